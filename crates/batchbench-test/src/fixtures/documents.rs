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

//! Canonical benchmark documents.

use super::builders::{DocumentBuilder, VariantBuilder};
use serde_json::{json, Value};

/// Solvers of the canonical solver documents, in document order.
pub const SOLVERS: [&str; 3] = ["direct", "bicgstab", "gmres"];

/// Residual norm reached by each solver of [`detailed_solver_document`].
pub const RESIDUALS: [f64; 3] = [1e-8, 1e-9, 1e-10];

/// The single-solver document of the reference example: GMRES on 50 entries,
/// apply kernel 0.9 s, total apply 1.2 s.
pub fn gmres_example() -> Value {
    DocumentBuilder::section("batch_solver")
        .variant(
            "gmres",
            VariantBuilder::new()
                .batch_entries(50)
                .apply(1.2, "batch_apply_kernel", 0.9)
                .build(),
        )
        .build()
}

/// A `batch_solver` document with one entry per solver in [`SOLVERS`].
///
/// Kernel times scale with the batch size so that sorted series are easy to
/// check: solver `i` takes `batch_size * (i + 1) / 1000` seconds.
pub fn solver_document(batch_size: u64, format: &str) -> Value {
    let mut doc = DocumentBuilder::section("batch_solver").top_level(
        "problem",
        json!({"name": "fixture", "num_rows": 22}),
    );
    for (i, solver) in SOLVERS.iter().enumerate() {
        let kernel = kernel_time(batch_size, i);
        doc = doc.variant(
            solver,
            VariantBuilder::new()
                .batch_entries(batch_size)
                .matrix_format(format)
                .apply_components(Some(kernel * 1.5), &[("setup", 0.001), ("apply_kernel", kernel)])
                .field("generate", json!({"time": 0.01}))
                .build(),
        );
    }
    doc.build()
}

/// Kernel time of solver `index` in [`solver_document`].
pub fn kernel_time(batch_size: u64, index: usize) -> f64 {
    batch_size as f64 * (index + 1) as f64 / 1000.0
}

/// A solver document carrying per-entry iterations and norms.
///
/// Entry `e` of solver `i` needs `10 * (i + 1) + e` iterations and reaches
/// the residual `RESIDUALS[i]` against a right-hand-side norm of 2.
pub fn detailed_solver_document(entries: usize) -> Value {
    let mut doc = DocumentBuilder::section("batch_solver")
        .top_level("problem", json!({"name": "detailed"}));
    for (i, solver) in SOLVERS.iter().enumerate() {
        let iters: Vec<f64> = (0..entries).map(|e| (10 * (i + 1) + e) as f64).collect();
        let residuals = vec![RESIDUALS[i]; entries];
        let rhs = vec![2.0; entries];
        doc = doc.variant(
            solver,
            VariantBuilder::new()
                .matrix_format("csr")
                .apply(0.02 * (i + 1) as f64, "apply_kernel", 0.01 * (i + 1) as f64)
                .entries("num_iters", &iters)
                .entries("residual_norm", &residuals)
                .entries("rhs_norm", &rhs)
                .build(),
        );
    }
    doc.build()
}

/// An `spmv` document comparing matrix formats.
pub fn spmv_document(batch_size: u64, formats: &[&str]) -> Value {
    let mut doc = DocumentBuilder::section("spmv");
    for (i, format) in formats.iter().enumerate() {
        doc = doc.variant(
            format,
            VariantBuilder::new()
                .batch_entries(batch_size)
                .matrix_format(format)
                .time(kernel_time(batch_size, i))
                .build(),
        );
    }
    doc.build()
}

/// A flat (abridged) solver document.
pub fn flat_document(batch_size: u64) -> Value {
    let mut doc = DocumentBuilder::flat();
    for (i, solver) in SOLVERS.iter().enumerate() {
        doc = doc.variant(
            solver,
            VariantBuilder::new()
                .batch_entries(batch_size)
                .matrix_format("csr")
                .apply(2.0 * kernel_time(batch_size, i), "apply_kernel", kernel_time(batch_size, i))
                .build(),
        );
    }
    doc.build()
}
