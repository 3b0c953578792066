// Dweve BatchBench - Batched Solver Benchmark Analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Extraction of benchmark records from variant metric objects.
//!
//! One [`BenchmarkRecord`] is produced per (file, variant) pair. Solver-kind
//! run types report the apply-kernel time found by pattern inside
//! `apply.components`; scalar run types (`spmv`) report their `time` field.
//! Nothing is defaulted: an absent field is an error.

use crate::document::{child_f64, child_object, section_path, BenchmarkDocument, JsonMap, RunType};
use crate::error::{BenchError, Result};
use crate::filename::CaseFile;
use crate::pattern::{extract_matching_f64, APPLY_PATTERN};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observation: a variant's metric for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Case the file belongs to.
    pub case_name: String,
    /// Solver or run variant.
    pub variant: String,
    /// Matrix storage format, when the document reports one.
    pub matrix_format: Option<String>,
    /// Number of entries in the batch (the independent variable).
    pub batch_size: u64,
    /// Multiplier encoded in the filename.
    pub batch_multiplier: u64,
    /// Primary metric (apply-kernel time or spmv time, seconds).
    pub metric_value: f64,
    /// Total apply time, for solver runs that report it.
    pub secondary_metric: Option<f64>,
}

/// Where the primary metric of a variant is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricSource {
    /// First key under `apply.components` containing the pattern.
    ApplyComponent {
        /// Substring identifying the component.
        pattern: String,
    },
    /// The variant's `time` field.
    DirectTime,
}

impl MetricSource {
    /// The metric source a run type reports through.
    ///
    /// The flat (abridged) layout only ever carries solver results.
    pub fn for_run_type(selector: Option<RunType>) -> Self {
        match selector {
            Some(RunType::Spmv) => MetricSource::DirectTime,
            _ => MetricSource::ApplyComponent {
                pattern: APPLY_PATTERN.to_string(),
            },
        }
    }
}

/// Per-batch-entry fields holding one value per matrix of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    /// Iterations taken for each entry.
    Iterations,
    /// Final residual norm of each entry.
    ResidualNorm,
    /// Right-hand-side norm of each entry.
    RhsNorm,
}

impl EntryField {
    /// Key of the field in a variant object.
    pub fn key(&self) -> &'static str {
        match self {
            EntryField::Iterations => "num_iters",
            EntryField::ResidualNorm => "residual_norm",
            EntryField::RhsNorm => "rhs_norm",
        }
    }

    /// Fields the batch size may be derived from, in lookup order.
    pub const BATCH_SIZE_SOURCES: [EntryField; 3] = [
        EntryField::Iterations,
        EntryField::ResidualNorm,
        EntryField::RhsNorm,
    ];
}

/// Builds [`BenchmarkRecord`]s from documents.
///
/// # Examples
///
/// ```
/// use batchbench_core::{BenchmarkDocument, CaseFile, RecordExtractor, RunType};
///
/// let doc = BenchmarkDocument::parse(r#"[{"batch_solver": {"gmres": {
///     "num_batch_entries": 50,
///     "apply": {"time": 1.2, "components": {"batch_apply_kernel": 0.9}}
/// }}}]"#).unwrap();
///
/// let file = CaseFile { case_name: "case7".into(), batch_multiplier: 192 };
/// let extractor = RecordExtractor::new(Some(RunType::BatchSolver));
/// let record = extractor.extract(&doc, "gmres", &file).unwrap();
///
/// assert_eq!(record.batch_size, 50);
/// assert_eq!(record.metric_value, 0.9);
/// assert_eq!(record.secondary_metric, Some(1.2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordExtractor {
    selector: Option<RunType>,
    source: MetricSource,
    require_matrix_format: bool,
}

impl RecordExtractor {
    /// Extractor for a run-type section (or the flat layout when `None`).
    pub fn new(selector: Option<RunType>) -> Self {
        Self {
            selector,
            source: MetricSource::for_run_type(selector),
            require_matrix_format: false,
        }
    }

    /// Override the apply-component pattern (solver run types only).
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        if let MetricSource::ApplyComponent { .. } = self.source {
            self.source = MetricSource::ApplyComponent {
                pattern: pattern.into(),
            };
        }
        self
    }

    /// Require every variant to report a `matrix_format`.
    pub fn with_required_matrix_format(mut self, required: bool) -> Self {
        self.require_matrix_format = required;
        self
    }

    /// The run-type section this extractor reads.
    pub fn selector(&self) -> Option<RunType> {
        self.selector
    }

    /// Where the primary metric comes from.
    pub fn source(&self) -> &MetricSource {
        &self.source
    }

    /// Extract the record of one variant.
    ///
    /// # Errors
    ///
    /// - [`BenchError::MissingField`] when `num_batch_entries` (and every
    ///   per-entry mapping it could be derived from), `apply`, `components`,
    ///   `time` or a required `matrix_format` is absent
    /// - [`BenchError::PatternNotFound`] when no component matches the pattern
    /// - [`BenchError::FieldType`] when a field has the wrong kind of value
    pub fn extract(
        &self,
        doc: &BenchmarkDocument,
        variant: &str,
        file: &CaseFile,
    ) -> Result<BenchmarkRecord> {
        let context = section_path(self.selector, Some(variant));
        let metrics = doc.variant(self.selector, variant)?;

        let batch_size = batch_size(metrics, &context)?;
        let matrix_format = self.matrix_format(metrics, &context)?;

        let (metric_value, secondary_metric) = match &self.source {
            MetricSource::ApplyComponent { pattern } => {
                let apply_context = format!("{}/apply", context);
                let apply = child_object(metrics, "apply", &context)?;
                let components = child_object(apply, "components", &apply_context)?;
                let kernel = extract_matching_f64(
                    components,
                    pattern,
                    &format!("{}/components", apply_context),
                )?;
                let total = match apply.get("time") {
                    Some(_) => Some(child_f64(apply, "time", &apply_context)?),
                    None => None,
                };
                (kernel, total)
            }
            MetricSource::DirectTime => (child_f64(metrics, "time", &context)?, None),
        };

        Ok(BenchmarkRecord {
            case_name: file.case_name.clone(),
            variant: variant.to_string(),
            matrix_format,
            batch_size,
            batch_multiplier: file.batch_multiplier,
            metric_value,
            secondary_metric,
        })
    }

    fn matrix_format(&self, metrics: &JsonMap, context: &str) -> Result<Option<String>> {
        match metrics.get("matrix_format") {
            Some(Value::String(format)) => Ok(Some(format.clone())),
            Some(_) => Err(BenchError::field_type("matrix_format", context, "a string")),
            None if self.require_matrix_format => {
                Err(BenchError::missing_field("matrix_format", context))
            }
            None => Ok(None),
        }
    }
}

/// Batch size of a variant: `num_batch_entries`, or the entry count of the
/// first per-entry field present (mapping or array).
pub fn batch_size(metrics: &JsonMap, context: &str) -> Result<u64> {
    let size = match metrics.get("num_batch_entries") {
        Some(value) => integer_value(value)
            .ok_or_else(|| BenchError::field_type("num_batch_entries", context, "an integer"))?,
        None => EntryField::BATCH_SIZE_SOURCES
            .iter()
            .find_map(|field| match metrics.get(field.key()) {
                Some(Value::Object(entries)) => Some(entries.len() as u64),
                Some(Value::Array(entries)) => Some(entries.len() as u64),
                _ => None,
            })
            .ok_or_else(|| BenchError::missing_field("num_batch_entries", context))?,
    };

    if size == 0 {
        return Err(BenchError::field_type(
            "num_batch_entries",
            context,
            "a positive batch size",
        ));
    }
    Ok(size)
}

/// Read a per-entry field into entry order.
///
/// The field is either a mapping from stringified index (`"0": [v], "1": [v],
/// ...`) or an array with one entry per index. Each entry is a one-element
/// sequence or a bare number.
///
/// # Errors
///
/// Fails with [`BenchError::MissingField`] when the field or one of the
/// indices `0..len` is absent, and with [`BenchError::FieldType`] when the
/// field is neither a mapping nor an array or an entry is not numeric.
pub fn entry_values(metrics: &JsonMap, field: EntryField, context: &str) -> Result<Vec<f64>> {
    let entry_context = format!("{}/{}", context, field.key());

    match metrics.get(field.key()) {
        Some(Value::Object(entries)) => (0..entries.len())
            .map(|index| {
                let key = index.to_string();
                let value = entries.get(&key).ok_or_else(|| {
                    BenchError::missing_field(key.as_str(), entry_context.as_str())
                })?;
                entry_value(value, &key, &entry_context)
            })
            .collect(),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, value)| entry_value(value, &index.to_string(), &entry_context))
            .collect(),
        Some(_) => Err(BenchError::field_type(
            field.key(),
            context,
            "a per-entry mapping or array",
        )),
        None => Err(BenchError::missing_field(field.key(), context)),
    }
}

fn entry_value(value: &Value, key: &str, context: &str) -> Result<f64> {
    let first = match value {
        Value::Array(items) => items.first(),
        scalar @ Value::Number(_) => Some(scalar),
        _ => None,
    };
    first
        .and_then(Value::as_f64)
        .ok_or_else(|| BenchError::field_type(key, context, "a numeric sequence"))
}

fn integer_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> CaseFile {
        CaseFile {
            case_name: "case7".to_string(),
            batch_multiplier: 192,
        }
    }

    fn solver_doc() -> BenchmarkDocument {
        BenchmarkDocument::parse(
            r#"[{"batch_solver": {
                "gmres": {
                    "num_batch_entries": 50,
                    "matrix_format": "csr",
                    "apply": {"time": 1.2, "components": {"setup": 0.1, "batch_apply_kernel": 0.9}}
                },
                "cg": {
                    "num_batch_entries": "50",
                    "apply": {"components": {"apply_cg": 0.4}}
                }
            }}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_solver_record() {
        let extractor = RecordExtractor::new(Some(RunType::BatchSolver));
        let record = extractor.extract(&solver_doc(), "gmres", &case()).unwrap();
        assert_eq!(
            record,
            BenchmarkRecord {
                case_name: "case7".to_string(),
                variant: "gmres".to_string(),
                matrix_format: Some("csr".to_string()),
                batch_size: 50,
                batch_multiplier: 192,
                metric_value: 0.9,
                secondary_metric: Some(1.2),
            }
        );
    }

    #[test]
    fn test_string_batch_size_and_missing_total() {
        let extractor = RecordExtractor::new(Some(RunType::BatchSolver));
        let record = extractor.extract(&solver_doc(), "cg", &case()).unwrap();
        assert_eq!(record.batch_size, 50);
        assert_eq!(record.metric_value, 0.4);
        assert_eq!(record.secondary_metric, None);
        assert_eq!(record.matrix_format, None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = RecordExtractor::new(Some(RunType::BatchSolver));
        let doc = solver_doc();
        let first = extractor.extract(&doc, "gmres", &case()).unwrap();
        let second = extractor.extract(&doc, "gmres", &case()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_required_matrix_format() {
        let extractor =
            RecordExtractor::new(Some(RunType::BatchSolver)).with_required_matrix_format(true);
        let err = extractor.extract(&solver_doc(), "cg", &case()).unwrap_err();
        assert_eq!(err, BenchError::missing_field("matrix_format", "batch_solver/cg"));
    }

    #[test]
    fn test_spmv_reads_time() {
        let doc = BenchmarkDocument::parse(
            r#"[{"spmv": {"csr": {"num_batch_entries": 8, "time": 0.003}}}]"#,
        )
        .unwrap();
        let extractor = RecordExtractor::new(Some(RunType::Spmv));
        let record = extractor.extract(&doc, "csr", &case()).unwrap();
        assert_eq!(record.metric_value, 0.003);
        assert_eq!(record.secondary_metric, None);
        assert_eq!(extractor.source(), &MetricSource::DirectTime);
    }

    #[test]
    fn test_spmv_missing_time() {
        let doc =
            BenchmarkDocument::parse(r#"[{"spmv": {"csr": {"num_batch_entries": 8}}}]"#).unwrap();
        let err = RecordExtractor::new(Some(RunType::Spmv))
            .extract(&doc, "csr", &case())
            .unwrap_err();
        assert_eq!(err, BenchError::missing_field("time", "spmv/csr"));
    }

    #[test]
    fn test_missing_apply() {
        let doc = BenchmarkDocument::parse(r#"[{"gmres": {"num_batch_entries": 2}}]"#).unwrap();
        let err = RecordExtractor::new(None)
            .extract(&doc, "gmres", &case())
            .unwrap_err();
        assert_eq!(err, BenchError::missing_field("apply", "gmres"));
    }

    #[test]
    fn test_pattern_not_found() {
        let doc = BenchmarkDocument::parse(
            r#"[{"gmres": {"num_batch_entries": 2, "apply": {"components": {"generate": 1.0}}}}]"#,
        )
        .unwrap();
        let err = RecordExtractor::new(None)
            .extract(&doc, "gmres", &case())
            .unwrap_err();
        assert!(matches!(err, BenchError::PatternNotFound { .. }));
    }

    #[test]
    fn test_custom_pattern() {
        let extractor = RecordExtractor::new(Some(RunType::BatchSolver)).with_pattern("setup");
        let record = extractor.extract(&solver_doc(), "gmres", &case()).unwrap();
        assert_eq!(record.metric_value, 0.1);
    }

    #[test]
    fn test_batch_size_from_entries() {
        let doc = BenchmarkDocument::parse(
            r#"[{"gmres": {
                "num_iters": {"0": [3], "1": [4], "2": [5]},
                "apply": {"components": {"apply": 1.0}}
            }}]"#,
        )
        .unwrap();
        let record = RecordExtractor::new(None)
            .extract(&doc, "gmres", &case())
            .unwrap();
        assert_eq!(record.batch_size, 3);
    }

    #[test]
    fn test_missing_batch_size() {
        let doc =
            BenchmarkDocument::parse(r#"[{"gmres": {"apply": {"components": {"apply": 1.0}}}}]"#)
                .unwrap();
        let err = RecordExtractor::new(None)
            .extract(&doc, "gmres", &case())
            .unwrap_err();
        assert_eq!(err, BenchError::missing_field("num_batch_entries", "gmres"));
    }

    #[test]
    fn test_zero_batch_size() {
        let doc = BenchmarkDocument::parse(
            r#"[{"gmres": {"num_batch_entries": 0, "apply": {"components": {"apply": 1.0}}}}]"#,
        )
        .unwrap();
        assert!(RecordExtractor::new(None)
            .extract(&doc, "gmres", &case())
            .is_err());
    }

    #[test]
    fn test_entry_values_in_index_order() {
        let doc = BenchmarkDocument::parse(
            r#"[{"cg": {"residual_norm": {"1": [1e-8], "0": [2e-9], "2": [3e-10]}}}]"#,
        )
        .unwrap();
        let metrics = doc.variant(None, "cg").unwrap();
        let values = entry_values(metrics, EntryField::ResidualNorm, "cg").unwrap();
        assert_eq!(values, vec![2e-9, 1e-8, 3e-10]);
    }

    #[test]
    fn test_entry_values_missing_index() {
        let doc =
            BenchmarkDocument::parse(r#"[{"cg": {"num_iters": {"0": [3], "2": [5]}}}]"#).unwrap();
        let metrics = doc.variant(None, "cg").unwrap();
        let err = entry_values(metrics, EntryField::Iterations, "cg").unwrap_err();
        assert_eq!(err, BenchError::missing_field("1", "cg/num_iters"));
    }

    #[test]
    fn test_entry_values_missing_field() {
        let doc = BenchmarkDocument::parse(r#"[{"cg": {}}]"#).unwrap();
        let metrics = doc.variant(None, "cg").unwrap();
        let err = entry_values(metrics, EntryField::RhsNorm, "cg").unwrap_err();
        assert_eq!(err, BenchError::missing_field("rhs_norm", "cg"));
    }

    #[test]
    fn test_per_entry_arrays() {
        let doc = BenchmarkDocument::parse(
            r#"[{"cg": {
                "rhs_norm": [[2.0], [4.0], 8.0],
                "apply": {"components": {"apply": 1.0}}
            }}]"#,
        )
        .unwrap();
        let metrics = doc.variant(None, "cg").unwrap();
        assert_eq!(
            entry_values(metrics, EntryField::RhsNorm, "cg").unwrap(),
            vec![2.0, 4.0, 8.0]
        );

        let record = RecordExtractor::new(None)
            .extract(&doc, "cg", &case())
            .unwrap();
        assert_eq!(record.batch_size, 3);
    }

    #[test]
    fn test_per_entry_field_of_wrong_type() {
        let doc = BenchmarkDocument::parse(r#"[{"cg": {"num_iters": 7}}]"#).unwrap();
        let metrics = doc.variant(None, "cg").unwrap();
        let err = entry_values(metrics, EntryField::Iterations, "cg").unwrap_err();
        assert!(matches!(err, BenchError::FieldType { .. }));
    }
}
