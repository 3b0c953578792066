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

//! Abridged documents written to disk and ingested again.

use batchbench_core::{ingest_directory, BenchmarkDocument, PipelineConfig};
use batchbench_json::{abridge_file, AbridgeOptions};
use batchbench_test::fixtures;
use batchbench_test::BatchDir;
use std::fs;

const MAX: u64 = 1 << 30;

#[test]
fn test_abridged_file_next_to_input() {
    let dir = BatchDir::new();
    let input = dir.write("detail-1.json", &fixtures::detailed_solver_document(4));

    let out = abridge_file(&input, MAX, AbridgeOptions::default()).unwrap();
    assert_eq!(out.file_name().unwrap(), "detail-1.json.processed");

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("[\n    {"));

    let doc = BenchmarkDocument::parse(&text).unwrap();
    assert_eq!(doc.root()["problem"]["name"], "detailed");
    for solver in fixtures::SOLVERS {
        let variant = &doc.root()["batch_solver"][solver];
        assert_eq!(variant["num_batch_entries"], 4);
        assert!(variant.get("num_iters").is_none());
        assert!(variant.get("rhs_norm").is_none());
    }
}

#[test]
fn test_abridged_documents_keep_timings() {
    let dir = BatchDir::new();
    let input = dir.write("detail-2.json", &fixtures::detailed_solver_document(3));
    let out = abridge_file(&input, MAX, AbridgeOptions { keep_iters_res: true }).unwrap();

    let abridged = BatchDir::new();
    abridged.write_raw("detail-2.json", &fs::read_to_string(out).unwrap());

    let original = ingest_directory(dir.path(), PipelineConfig::default()).unwrap();
    let reduced = ingest_directory(abridged.path(), PipelineConfig::default()).unwrap();
    assert_eq!(original, reduced);
}

#[test]
fn test_missing_section_names_the_file() {
    let dir = BatchDir::new();
    let input = dir.write("mat-1.json", &fixtures::spmv_document(1, &["csr"]));
    let err = abridge_file(&input, MAX, AbridgeOptions::default()).unwrap_err();
    assert!(err.to_string().contains("batch_solver"));
}
