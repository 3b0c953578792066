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

//! Malformed and incomplete documents for error-path tests.

use super::builders::{DocumentBuilder, VariantBuilder};
use serde_json::{json, Value};

/// Texts that are not benchmark documents at all, as (name, text) pairs.
pub fn malformed_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("not_json", "solver: gmres"),
        ("truncated", r#"[{"batch_solver": {"gmres": "#),
        ("bare_object", r#"{"batch_solver": {}}"#),
        ("empty_array", "[]"),
        ("array_of_numbers", "[1, 2, 3]"),
        ("null", "null"),
    ]
}

/// A variant without any `apply.components` key containing `apply`.
pub fn missing_apply_component() -> Value {
    DocumentBuilder::section("batch_solver")
        .variant(
            "gmres",
            VariantBuilder::new()
                .batch_entries(4)
                .apply_components(Some(1.0), &[("setup", 0.2), ("generate", 0.3)])
                .build(),
        )
        .build()
}

/// A variant without `num_batch_entries` or any per-entry mapping.
pub fn missing_batch_entries() -> Value {
    DocumentBuilder::section("batch_solver")
        .variant(
            "gmres",
            VariantBuilder::new().apply(1.0, "apply", 0.5).build(),
        )
        .build()
}

/// Block solver output, which lives under a `solver` section.
pub fn block_solver_document() -> Value {
    json!([{"solver": {"gmres": {"apply": {"time": 1.0}}}}])
}
