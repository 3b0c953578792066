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

//! Canonical benchmark fixtures.
//!
//! - **documents**: well-formed solver, spmv and flat documents
//! - **errors**: malformed text and documents missing required fields
//! - **builders**: builders for customised documents

pub mod builders;
mod documents;
pub mod errors;

pub use documents::*;

use crate::FixtureList;
use serde_json::Value;

/// Returns all well-formed fixture documents for iteration.
pub fn all() -> FixtureList {
    vec![
        ("gmres_example", gmres_example),
        ("solver_small", solver_small),
        ("solver_large", solver_large),
        ("detailed_solver", detailed_solver),
        ("spmv", spmv),
        ("flat", flat),
    ]
}

fn solver_small() -> Value {
    solver_document(8, "csr")
}

fn solver_large() -> Value {
    solver_document(64, "ell")
}

fn detailed_solver() -> Value {
    detailed_solver_document(4)
}

fn spmv() -> Value {
    spmv_document(16, &["csr", "ell", "dense"])
}

fn flat() -> Value {
    flat_document(32)
}
