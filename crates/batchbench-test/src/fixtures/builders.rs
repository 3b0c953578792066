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

//! Builders for benchmark documents.
//!
//! Documents are produced as `serde_json::Value`s shaped like the solver
//! harness output, so tests can tweak one field at a time.

use serde_json::{json, Map, Value};

/// Builder for the metric object of one variant.
///
/// # Examples
///
/// ```
/// use batchbench_test::fixtures::builders::VariantBuilder;
///
/// let gmres = VariantBuilder::new()
///     .batch_entries(50)
///     .apply(1.2, "batch_apply_kernel", 0.9)
///     .build();
///
/// assert_eq!(gmres["apply"]["components"]["batch_apply_kernel"], 0.9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariantBuilder {
    fields: Map<String, Value>,
}

impl VariantBuilder {
    /// Creates an empty variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `num_batch_entries`.
    pub fn batch_entries(mut self, entries: u64) -> Self {
        self.fields
            .insert("num_batch_entries".to_string(), json!(entries));
        self
    }

    /// Sets `matrix_format`.
    pub fn matrix_format(mut self, format: &str) -> Self {
        self.fields
            .insert("matrix_format".to_string(), json!(format));
        self
    }

    /// Sets `apply.time` and a single apply component.
    pub fn apply(self, total: f64, component: &str, kernel: f64) -> Self {
        self.apply_components(Some(total), &[(component, kernel)])
    }

    /// Sets `apply` with an optional total and any number of components, in order.
    pub fn apply_components(mut self, total: Option<f64>, components: &[(&str, f64)]) -> Self {
        let mut apply = Map::new();
        if let Some(total) = total {
            apply.insert("time".to_string(), json!(total));
        }
        let components: Map<String, Value> = components
            .iter()
            .map(|(name, time)| (name.to_string(), json!(time)))
            .collect();
        apply.insert("components".to_string(), Value::Object(components));
        self.fields.insert("apply".to_string(), Value::Object(apply));
        self
    }

    /// Sets a direct `time` field (spmv runs).
    pub fn time(mut self, time: f64) -> Self {
        self.fields.insert("time".to_string(), json!(time));
        self
    }

    /// Sets a per-entry mapping (`num_iters`, `residual_norm`, `rhs_norm`).
    pub fn entries(mut self, field: &str, values: &[f64]) -> Self {
        let entries: Map<String, Value> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), json!([v])))
            .collect();
        self.fields.insert(field.to_string(), Value::Object(entries));
        self
    }

    /// Sets an arbitrary field.
    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Builds the metric object.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Builder for a whole document.
///
/// With a section name the variants are nested under it; without one the
/// flat (abridged) layout is produced.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    section: Option<String>,
    variants: Map<String, Value>,
    extra: Map<String, Value>,
}

impl DocumentBuilder {
    /// Document with variants under `section` (e.g. `batch_solver`).
    pub fn section(section: &str) -> Self {
        Self {
            section: Some(section.to_string()),
            ..Self::default()
        }
    }

    /// Document with variants at the top level.
    pub fn flat() -> Self {
        Self::default()
    }

    /// Adds a variant; insertion order is kept.
    pub fn variant(mut self, name: &str, metrics: Value) -> Self {
        self.variants.insert(name.to_string(), metrics);
        self
    }

    /// Adds a top-level entry next to the section (e.g. `problem`).
    pub fn top_level(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    /// Builds the document: an array holding one object.
    pub fn build(self) -> Value {
        let mut root = self.extra;
        match self.section {
            Some(section) => {
                root.insert(section, Value::Object(self.variants));
            }
            None => root.extend(self.variants),
        }
        Value::Array(vec![Value::Object(root)])
    }

    /// Builds the document as JSON text.
    pub fn to_json(self) -> String {
        self.build().to_string()
    }
}
