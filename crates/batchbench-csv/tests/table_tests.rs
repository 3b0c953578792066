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

//! Integration tests: ingest a batch directory, write its tables, read them back.

use batchbench_core::export::table_records;
use batchbench_core::{ingest_directory, ExportLabels, NormType, PipelineConfig, TableRecord};
use batchbench_csv::{read_table_file, table_path, write_table_file};
use batchbench_test::fixtures::{self, kernel_time};
use batchbench_test::BatchDir;

fn case_rows(dir: &BatchDir, labels: &ExportLabels) -> (String, Vec<TableRecord>) {
    let cases = ingest_directory(dir.path(), PipelineConfig::default()).unwrap();
    assert_eq!(cases.len(), 1);
    let case = &cases[0];
    let rows = case
        .series
        .iter()
        .flat_map(|series| table_records(&case.case_name, series, labels))
        .collect();
    (case.case_name.clone(), rows)
}

#[test]
fn test_sorted_pairs_survive_the_table() {
    let batch = BatchDir::new();
    for size in [128, 2, 32] {
        batch.write(
            &format!("pele-{}.json", size),
            &fixtures::solver_document(size, "ell"),
        );
    }

    let labels = ExportLabels::default();
    let (case_name, rows) = case_rows(&batch, &labels);
    assert_eq!(rows.len(), 9);

    let out = tempfile::tempdir().unwrap();
    let path = write_table_file(out.path(), &case_name, &rows).unwrap();
    assert_eq!(path, table_path(out.path(), "pele"));

    let read = read_table_file(&path).unwrap();
    assert_eq!(read, rows);

    for (i, solver) in fixtures::SOLVERS.iter().enumerate() {
        let pairs: Vec<(u64, f64)> = read
            .iter()
            .filter(|r| r.solver_type == *solver)
            .map(|r| (r.batch_size, r.solve_time))
            .collect();
        let expected: Vec<(u64, f64)> = [2, 32, 128]
            .iter()
            .map(|&size| (size, kernel_time(size, i)))
            .collect();
        assert_eq!(pairs, expected, "solver {}", solver);
    }
}

#[test]
fn test_labels_fill_processor_and_tolerance() {
    let batch = BatchDir::new();
    batch.write("c-4.json", &fixtures::solver_document(4, "csr"));

    let labels = ExportLabels {
        processor: "GPU".to_string(),
        norm_type: NormType::Absolute,
        matrix_format: None,
    };
    let (_, rows) = case_rows(&batch, &labels);
    assert!(rows.iter().all(|r| r.processor == "GPU"));
    assert!(rows.iter().all(|r| r.tolerance_type == "absolute"));
    assert!(rows.iter().all(|r| r.matrix_format == "csr"));
}
