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

//! Abridge solver documents down to their timing data.
//!
//! Detailed solver runs record per-entry iteration counts and residual norms
//! for every system in the batch, which makes the documents large. An
//! abridged document keeps only what the timing analyses read, and is written
//! next to the input as `<file>.processed`.

use crate::error::{JsonExportError, Result};
use batchbench_core::{BenchError, BenchmarkDocument, JsonMap, RunType};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix appended to the input filename.
pub const ABRIDGED_SUFFIX: &str = ".processed";

/// Per-variant fields copied unchanged when present.
const OPTIONAL_FIELDS: [&str; 2] = ["scaling", "generate"];

/// Per-entry fields copied with `keep_iters_res`.
const DETAIL_FIELDS: [&str; 2] = ["num_iters", "residual_norm"];

/// Options for abridging.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbridgeOptions {
    /// Keep `num_iters` and `residual_norm` of every variant.
    pub keep_iters_res: bool,
}

/// Build the abridged form of a solver document.
///
/// The result is a top-level array holding one object with the document's
/// `problem` entry (when present) and a `batch_solver` section. Each variant
/// keeps `matrix_format`, `scaling` and `generate` (when present),
/// `num_batch_entries` (the number of `rhs_norm` entries) and the `apply` components
/// and total time.
///
/// # Errors
///
/// [`BenchError::MissingField`] if the `batch_solver` section or a required
/// per-variant field is absent.
///
/// # Examples
///
/// ```
/// use batchbench_core::BenchmarkDocument;
/// use batchbench_json::{abridge_document, AbridgeOptions};
///
/// let doc = BenchmarkDocument::parse(r#"[{"batch_solver": {"cg": {
///     "matrix_format": "csr",
///     "rhs_norm": {"0": [1.0], "1": [1.0]},
///     "residual_norm": {"0": [1e-9], "1": [1e-9]},
///     "apply": {"time": 0.2, "components": {"apply_kernel": 0.1}}
/// }}}]"#).unwrap();
///
/// let abridged = abridge_document(&doc, AbridgeOptions::default()).unwrap();
/// let cg = &abridged[0]["batch_solver"]["cg"];
/// assert_eq!(cg["num_batch_entries"], 2);
/// assert!(cg.get("residual_norm").is_none());
/// ```
pub fn abridge_document(doc: &BenchmarkDocument, options: AbridgeOptions) -> Result<Value> {
    let run_type = RunType::BatchSolver;
    let variants = doc.variants(Some(run_type))?;

    let mut section = JsonMap::new();
    for (key, metrics) in variants {
        debug!("Found solver: {}", key);
        let context = format!("{}/{}", run_type.key(), key);
        let metrics = metrics
            .as_object()
            .ok_or_else(|| BenchError::field_type(key.as_str(), run_type.key(), "an object"))?;
        section.insert(key.clone(), Value::Object(abridge_variant(metrics, &context, options)?));
    }

    let mut root = JsonMap::new();
    if let Some(problem) = doc.root().get("problem") {
        root.insert("problem".to_string(), problem.clone());
    }
    root.insert(run_type.key().to_string(), Value::Object(section));

    Ok(Value::Array(vec![Value::Object(root)]))
}

fn abridge_variant(metrics: &JsonMap, context: &str, options: AbridgeOptions) -> Result<JsonMap> {
    let mut out = JsonMap::new();
    out.insert(
        "matrix_format".to_string(),
        required(metrics, "matrix_format", context)?.clone(),
    );

    let entries = match required(metrics, "rhs_norm", context)? {
        Value::Object(per_entry) => per_entry.len(),
        Value::Array(per_entry) => per_entry.len(),
        _ => {
            return Err(BenchError::field_type("rhs_norm", context, "a per-entry mapping").into())
        }
    };
    out.insert("num_batch_entries".to_string(), Value::from(entries));

    for field in OPTIONAL_FIELDS {
        if let Some(value) = metrics.get(field) {
            out.insert(field.to_string(), value.clone());
        }
    }

    let apply_context = format!("{}/apply", context);
    let apply = required(metrics, "apply", context)?
        .as_object()
        .ok_or_else(|| BenchError::field_type("apply", context, "an object"))?;
    let mut apply_out = JsonMap::new();
    apply_out.insert(
        "components".to_string(),
        required(apply, "components", &apply_context)?.clone(),
    );
    apply_out.insert(
        "time".to_string(),
        required(apply, "time", &apply_context)?.clone(),
    );
    out.insert("apply".to_string(), Value::Object(apply_out));

    if options.keep_iters_res {
        for field in DETAIL_FIELDS {
            out.insert(field.to_string(), required(metrics, field, context)?.clone());
        }
    }

    Ok(out)
}

fn required<'a>(map: &'a JsonMap, field: &str, context: &str) -> Result<&'a Value> {
    map.get(field)
        .ok_or_else(|| JsonExportError::from(BenchError::missing_field(field, context)))
}

/// Serialize a value pretty-printed with a 4-space indent.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Output path of an abridged document: the input path with `.processed` appended.
pub fn abridged_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ABRIDGED_SUFFIX);
    PathBuf::from(name)
}

/// Abridge one document file and write the result next to it.
///
/// Returns the path written.
pub fn abridge_file(path: &Path, max_file_size: u64, options: AbridgeOptions) -> Result<PathBuf> {
    let doc = BenchmarkDocument::load(path, max_file_size)?;
    let value = abridge_document(&doc, options).map_err(|e| match e {
        JsonExportError::Document(inner) => JsonExportError::Document(inner.in_file(path)),
        other => other,
    })?;

    let out = abridged_path(path);
    fs::write(&out, to_pretty_string(&value)?).map_err(|e| JsonExportError::write(&out, e))?;
    info!("Wrote {}", out.display());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn solver_doc(extra: Value) -> BenchmarkDocument {
        let mut cg = json!({
            "matrix_format": "csr",
            "rhs_norm": [2.0, 2.0, 2.0],
            "num_iters": [3, 4, 5],
            "residual_norm": [1e-9, 1e-9, 1e-9],
            "apply": {"time": 0.5, "components": {"setup": 0.1, "apply_kernel": 0.3}, "extra": 1},
            "preconditioner": "jacobi"
        });
        if let (Some(target), Value::Object(fields)) = (cg.as_object_mut(), extra) {
            target.extend(fields);
        }
        BenchmarkDocument::from_value(json!([{
            "problem": {"name": "p"},
            "batch_solver": {"cg": cg}
        }]))
        .unwrap()
    }

    #[test]
    fn test_keeps_timing_fields_only() {
        let out = abridge_document(&solver_doc(json!({})), AbridgeOptions::default()).unwrap();
        assert_eq!(
            out,
            json!([{
                "problem": {"name": "p"},
                "batch_solver": {"cg": {
                    "matrix_format": "csr",
                    "num_batch_entries": 3,
                    "apply": {"components": {"setup": 0.1, "apply_kernel": 0.3}, "time": 0.5}
                }}
            }])
        );
    }

    #[test]
    fn test_keep_iters_res() {
        let options = AbridgeOptions {
            keep_iters_res: true,
        };
        let out = abridge_document(&solver_doc(json!({})), options).unwrap();
        let cg = &out[0]["batch_solver"]["cg"];
        assert_eq!(cg["num_iters"], json!([3, 4, 5]));
        assert_eq!(cg["residual_norm"], json!([1e-9, 1e-9, 1e-9]));
    }

    #[test]
    fn test_optional_fields_kept_when_present() {
        let doc = solver_doc(json!({"scaling": {"time": 0.01}, "generate": {"time": 0.2}}));
        let out = abridge_document(&doc, AbridgeOptions::default()).unwrap();
        let cg = &out[0]["batch_solver"]["cg"];
        assert_eq!(cg["scaling"], json!({"time": 0.01}));
        assert_eq!(cg["generate"], json!({"time": 0.2}));
    }

    #[test]
    fn test_requires_batch_solver_section() {
        let doc = BenchmarkDocument::from_value(json!([{"spmv": {}}])).unwrap();
        let err = abridge_document(&doc, AbridgeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            JsonExportError::Document(BenchError::MissingField { ref field, .. })
                if field == "batch_solver"
        ));
    }

    #[test]
    fn test_requires_rhs_norm() {
        let doc = BenchmarkDocument::from_value(json!([{"batch_solver": {"cg": {
            "matrix_format": "csr",
            "apply": {"time": 1.0, "components": {}}
        }}}]))
        .unwrap();
        let err = abridge_document(&doc, AbridgeOptions::default()).unwrap_err();
        assert!(err.to_string().contains("rhs_norm"));
        assert!(err.to_string().contains("batch_solver/cg"));
    }

    #[test]
    fn test_four_space_indent() {
        let text = to_pretty_string(&json!([{"a": 1}])).unwrap();
        assert_eq!(text, "[\n    {\n        \"a\": 1\n    }\n]");
    }

    #[test]
    fn test_abridged_path() {
        assert_eq!(
            abridged_path(Path::new("runs/case-1.json")),
            PathBuf::from("runs/case-1.json.processed")
        );
    }
}
