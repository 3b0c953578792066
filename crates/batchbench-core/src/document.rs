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

//! Parsed benchmark documents and run-type selection.
//!
//! The solver harness writes one JSON document per run: a top-level array whose
//! first element is an object. That object either holds one section per run
//! type (`batch_solver`, `spmv`, ...) mapping variant names to metric objects,
//! or, for abridged inputs, maps variant names to metric objects directly.
//!
//! The document is kept as a `serde_json` mapping with insertion order
//! preserved, because variant discovery and pattern matching both depend on
//! the order keys appear in the file.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Ordered JSON object, as stored in benchmark documents.
pub type JsonMap = Map<String, Value>;

/// The benchmark category a document section belongs to.
///
/// # Examples
///
/// ```
/// use batchbench_core::RunType;
///
/// let rt: RunType = "batch_solver".parse().unwrap();
/// assert_eq!(rt, RunType::BatchSolver);
/// assert!(rt.is_solver());
/// assert!("solver".parse::<RunType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    /// Iterative batched linear solves; metrics carry an `apply` component breakdown.
    BatchSolver,
    /// Batched sparse matrix-vector products; metrics carry a direct `time`.
    Spmv,
}

impl RunType {
    /// The section key this run type occupies in a document.
    pub fn key(&self) -> &'static str {
        match self {
            RunType::BatchSolver => "batch_solver",
            RunType::Spmv => "spmv",
        }
    }

    /// Whether metrics of this run type are resolved through the `apply` components.
    pub fn is_solver(&self) -> bool {
        matches!(self, RunType::BatchSolver)
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RunType {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "batch_solver" => Ok(RunType::BatchSolver),
            "spmv" => Ok(RunType::Spmv),
            other => Err(BenchError::UnsupportedRunType(format!(
                "'{}' (expected 'batch_solver' or 'spmv')",
                other
            ))),
        }
    }
}

/// A single benchmark result document.
///
/// # Examples
///
/// ```
/// use batchbench_core::{BenchmarkDocument, RunType};
///
/// let doc = BenchmarkDocument::parse(
///     r#"[{"batch_solver": {"gmres": {"num_batch_entries": 50}}}]"#,
/// ).unwrap();
///
/// let variants = doc.variants(Some(RunType::BatchSolver)).unwrap();
/// assert!(variants.contains_key("gmres"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkDocument {
    root: JsonMap,
}

impl BenchmarkDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::MalformedDocument`] if the text is not JSON or the
    /// top level is not an array whose first element is an object.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => match items.into_iter().next() {
                Some(Value::Object(root)) => Ok(Self { root }),
                Some(other) => Err(BenchError::MalformedDocument(format!(
                    "first array element is {}, expected an object",
                    value_kind(&other)
                ))),
                None => Err(BenchError::MalformedDocument(
                    "top-level array is empty".to_string(),
                )),
            },
            other => Err(BenchError::MalformedDocument(format!(
                "top level is {}, expected an array",
                value_kind(&other)
            ))),
        }
    }

    /// Read and parse a document from disk, rejecting files above `max_bytes`.
    pub fn load(path: &Path, max_bytes: u64) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| BenchError::io_error(path, e))?;
        if metadata.len() > max_bytes {
            return Err(BenchError::FileTooLarge {
                path: path.to_path_buf(),
                actual: metadata.len(),
                max: max_bytes,
            });
        }

        let text = fs::read_to_string(path).map_err(|e| BenchError::io_error(path, e))?;
        Self::parse(&text).map_err(|e| e.in_file(path))
    }

    /// The top-level object of the document.
    pub fn root(&self) -> &JsonMap {
        &self.root
    }

    /// The mapping of variant name to metric object.
    ///
    /// With a run type the variants are looked up under that section; without
    /// one the top-level object itself is the variant mapping.
    pub fn variants(&self, selector: Option<RunType>) -> Result<&JsonMap> {
        match selector {
            Some(run_type) => child_object(&self.root, run_type.key(), "document"),
            None => Ok(&self.root),
        }
    }

    /// The metric object of one variant.
    pub fn variant(&self, selector: Option<RunType>, key: &str) -> Result<&JsonMap> {
        let variants = self.variants(selector)?;
        child_object(variants, key, &section_path(selector, None))
    }
}

/// Slash-separated location of a variant (or of the section) for error messages.
pub(crate) fn section_path(selector: Option<RunType>, variant: Option<&str>) -> String {
    match (selector, variant) {
        (Some(rt), Some(v)) => format!("{}/{}", rt.key(), v),
        (Some(rt), None) => rt.key().to_string(),
        (None, Some(v)) => v.to_string(),
        (None, None) => "document".to_string(),
    }
}

/// Look up a child that must be an object.
pub(crate) fn child_object<'a>(
    map: &'a JsonMap,
    field: &str,
    context: &str,
) -> Result<&'a JsonMap> {
    match map.get(field) {
        Some(Value::Object(child)) => Ok(child),
        Some(_) => Err(BenchError::field_type(field, context, "an object")),
        None => Err(BenchError::missing_field(field, context)),
    }
}

/// Look up a child that must be a number.
pub(crate) fn child_f64(map: &JsonMap, field: &str, context: &str) -> Result<f64> {
    match map.get(field) {
        Some(value) => value
            .as_f64()
            .ok_or_else(|| BenchError::field_type(field, context, "a number")),
        None => Err(BenchError::missing_field(field, context)),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_takes_first_object() {
        let doc = BenchmarkDocument::parse(r#"[{"spmv": {}}, {"ignored": 1}]"#).unwrap();
        assert!(doc.root().contains_key("spmv"));
        assert!(!doc.root().contains_key("ignored"));
    }

    #[test]
    fn test_parse_rejects_bare_object() {
        let err = BenchmarkDocument::parse(r#"{"batch_solver": {}}"#).unwrap_err();
        assert_eq!(
            err,
            BenchError::MalformedDocument("top level is an object, expected an array".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_empty_array() {
        let err = BenchmarkDocument::parse("[]").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            BenchmarkDocument::parse("[{"),
            Err(BenchError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_variants_preserve_document_order() {
        let doc = BenchmarkDocument::parse(
            r#"[{"batch_solver": {"richardson": {}, "bicgstab": {}, "cg": {}}}]"#,
        )
        .unwrap();
        let keys: Vec<&String> = doc
            .variants(Some(RunType::BatchSolver))
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["richardson", "bicgstab", "cg"]);
    }

    #[test]
    fn test_variants_missing_section() {
        let doc = BenchmarkDocument::parse(r#"[{"batch_solver": {}}]"#).unwrap();
        let err = doc.variants(Some(RunType::Spmv)).unwrap_err();
        assert_eq!(err, BenchError::missing_field("spmv", "document"));
    }

    #[test]
    fn test_flat_layout_uses_root() {
        let doc = BenchmarkDocument::parse(r#"[{"gmres": {"apply": {}}}]"#).unwrap();
        let variant = doc.variant(None, "gmres").unwrap();
        assert!(variant.contains_key("apply"));
    }

    #[test]
    fn test_variant_not_an_object() {
        let doc = BenchmarkDocument::parse(r#"[{"batch_solver": {"cg": 3}}]"#).unwrap();
        let err = doc.variant(Some(RunType::BatchSolver), "cg").unwrap_err();
        assert_eq!(err, BenchError::field_type("cg", "batch_solver", "an object"));
    }

    #[test]
    fn test_run_type_round_trip() {
        for rt in [RunType::BatchSolver, RunType::Spmv] {
            assert_eq!(rt.to_string().parse::<RunType>().unwrap(), rt);
        }
    }

    #[test]
    fn test_block_run_type_unsupported() {
        assert!(matches!(
            "solver".parse::<RunType>(),
            Err(BenchError::UnsupportedRunType(_))
        ));
    }

    #[test]
    fn test_section_path() {
        assert_eq!(section_path(Some(RunType::Spmv), Some("csr")), "spmv/csr");
        assert_eq!(section_path(None, Some("csr")), "csr");
        assert_eq!(section_path(None, None), "document");
    }
}
