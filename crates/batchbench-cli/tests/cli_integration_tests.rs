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

//! End-to-end tests of the `batchbench` binary.

use assert_cmd::Command;
use batchbench_core::{PlotFigure, TableRecord};
use batchbench_csv::read_table_file;
use batchbench_test::fixtures::{self, errors, kernel_time};
use batchbench_test::BatchDir;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn batchbench_cmd() -> Command {
    Command::cargo_bin("batchbench").expect("Failed to find batchbench binary")
}

fn run(args: &[&str], dir: &Path, out: &Path) -> assert_cmd::assert::Assert {
    batchbench_cmd()
        .args(args)
        .arg("--dir")
        .arg(dir)
        .arg("--output_dir")
        .arg(out)
        .assert()
}

fn solver_batch(case: &str, sizes: &[u64]) -> BatchDir {
    let dir = BatchDir::new();
    for &size in sizes {
        dir.write(
            &format!("{}-{}.json", case, size),
            &fixtures::solver_document(size, "csr"),
        );
    }
    dir
}

fn read_figure(path: &Path) -> PlotFigure {
    let text = fs::read_to_string(path).expect("figure written");
    serde_json::from_str(&text).expect("figure is valid JSON")
}

fn rows(path: &Path) -> Vec<TableRecord> {
    read_table_file(path).expect("table readable")
}

// ===== Basic =====

#[test]
fn test_help_output() {
    batchbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("batched solver benchmark analysis"))
        .stdout(predicate::str::contains("timings"))
        .stdout(predicate::str::contains("plot-tables"));
}

#[test]
fn test_no_subcommand_fails() {
    batchbench_cmd().assert().failure();
}

#[test]
fn test_unknown_norm_type_rejected() {
    batchbench_cmd()
        .args(["table", "--norm_type", "maximum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum"));
}

// ===== table =====

#[test]
fn test_table_rows_sorted_per_solver() {
    let batch = solver_batch("case7", &[192, 8, 64]);
    let out = TempDir::new().unwrap();

    run(&["table", "--processor", "GPU"], batch.path(), out.path())
        .success()
        .stdout(predicate::str::contains("case7.txt"));

    let table = rows(&out.path().join("case7.txt"));
    assert_eq!(table.len(), 9);
    for (i, solver) in fixtures::SOLVERS.iter().enumerate() {
        let pairs: Vec<(u64, f64)> = table
            .iter()
            .filter(|r| r.solver_type == *solver)
            .map(|r| (r.batch_size, r.solve_time))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (8, kernel_time(8, i)),
                (64, kernel_time(64, i)),
                (192, kernel_time(192, i)),
            ]
        );
    }
    assert!(table.iter().all(|r| r.processor == "GPU"));
    assert!(table.iter().all(|r| r.tolerance_type == "relative"));
}

#[test]
fn test_table_labels_and_kebab_aliases() {
    let batch = solver_batch("pele", &[4]);
    let out = TempDir::new().unwrap();

    batchbench_cmd()
        .arg("table")
        .arg("--dir")
        .arg(batch.path())
        .arg("--output-dir")
        .arg(out.path())
        .args(["--norm-type", "absolute", "--matrix-format", "ell"])
        .assert()
        .success();

    let table = rows(&out.path().join("pele.txt"));
    assert!(table.iter().all(|r| r.tolerance_type == "absolute"));
    assert!(table.iter().all(|r| r.matrix_format == "ell"));
}

#[test]
fn test_table_spmv() {
    let batch = BatchDir::new();
    for size in [20, 10] {
        batch.write(
            &format!("mat-{}.json", size),
            &fixtures::spmv_document(size, &["csr", "ell"]),
        );
    }
    let out = TempDir::new().unwrap();

    run(&["table", "--run_type", "spmv"], batch.path(), out.path()).success();

    let table = rows(&out.path().join("mat.txt"));
    let ell: Vec<u64> = table
        .iter()
        .filter(|r| r.solver_type == "ell")
        .map(|r| r.batch_size)
        .collect();
    assert_eq!(ell, vec![10, 20]);
}

#[test]
fn test_parallel_matches_serial() {
    let sizes: Vec<u64> = (1..=12).map(|i| i * 7 % 13 + 1).collect();
    let batch = solver_batch("case", &sizes);
    let serial = TempDir::new().unwrap();
    run(&["table"], batch.path(), serial.path()).success();
    let expected = fs::read_to_string(serial.path().join("case.txt")).unwrap();

    for args in [&["table", "--parallel"][..], &["table", "--parallel", "--threads", "2"][..]] {
        let parallel = TempDir::new().unwrap();
        run(args, batch.path(), parallel.path()).success();
        assert_eq!(
            fs::read_to_string(parallel.path().join("case.txt")).unwrap(),
            expected
        );
    }
}

// ===== failures =====

#[test]
fn test_empty_directory_writes_nothing() {
    let batch = BatchDir::new();
    let out = TempDir::new().unwrap();
    let target = out.path().join("tables");

    run(&["table"], batch.path(), &target)
        .failure()
        .stderr(predicate::str::contains("Error: "))
        .stderr(predicate::str::contains("No benchmark documents found"));
    assert!(!target.exists());
}

#[test]
fn test_variant_mismatch_fails() {
    let batch = solver_batch("case7", &[8]);
    batch.write("case7-9.json", &fixtures::gmres_example());
    let out = TempDir::new().unwrap();

    run(&["timings", "--run_type", "batch_solver"], batch.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("case7-9.json"));
}

#[test]
fn test_variant_mismatch_fails_in_parallel() {
    let batch = solver_batch("case7", &[8, 16, 32]);
    batch.write("case7-4.json", &fixtures::gmres_example());
    let out = TempDir::new().unwrap();

    run(&["table", "--parallel"], batch.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("case7-4.json"));
}

#[test]
fn test_bad_filename_fails() {
    let batch = BatchDir::new();
    batch.write("case7.json", &fixtures::solver_document(1, "csr"));
    let out = TempDir::new().unwrap();

    run(&["table"], batch.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("case7.json"));
}

#[test]
fn test_missing_apply_component_fails() {
    let batch = BatchDir::new();
    batch.write("case-1.json", &errors::missing_apply_component());
    let out = TempDir::new().unwrap();

    run(&["table"], batch.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("apply"));
}

// ===== figures =====

#[test]
fn test_outputs_in_the_batch_directory_are_not_reread() {
    let batch = solver_batch("case7", &[8, 16]);
    let dir = batch.path();

    run(&["timings", "--run_type", "batch_solver"], dir, dir).success();
    assert!(dir.join("case7-timings.figure").exists());

    run(&["timings", "--run_type", "batch_solver"], dir, dir).success();
    run(&["table"], dir, dir).success();
    run(&["speedup"], dir, dir).success();

    let table = rows(&dir.join("case7.txt"));
    assert_eq!(table.len(), 6);
}

#[test]
fn test_timings_figure() {
    let batch = BatchDir::new();
    batch.write("run_s2.json", &fixtures::solver_document(2, "csr"));
    batch.write("run_s1.json", &fixtures::solver_document(1, "csr"));
    let out = TempDir::new().unwrap();

    run(
        &[
            "timings",
            "--run_type",
            "batch_solver",
            "--convention",
            "prefixed",
            "--unit",
            "ms",
            "--log",
        ],
        batch.path(),
        out.path(),
    )
    .success();

    let figure = read_figure(&out.path().join("run-timings.figure"));
    assert_eq!(figure.y_label, "Time (ms)");
    assert!(figure.log_y);
    assert_eq!(figure.series.len(), 3);
    assert_eq!(figure.series[1].label, "bicgstab");
    assert_eq!(figure.series[1].points[0].0, 1.0);
    assert_eq!(figure.series[1].points[1].0, 2.0);
}

#[test]
fn test_timings_flat_layout() {
    let batch = BatchDir::new();
    batch.write("abridged-5.json", &fixtures::flat_document(5));
    let out = TempDir::new().unwrap();

    run(&["timings"], batch.path(), out.path()).success();
    let figure = read_figure(&out.path().join("abridged-timings.figure"));
    assert_eq!(figure.series.len(), 3);
}

#[test]
fn test_iters_figure() {
    let batch = BatchDir::new();
    batch.write("detail-1.json", &fixtures::detailed_solver_document(3));
    let out = TempDir::new().unwrap();

    run(&["iters"], batch.path(), out.path()).success();

    let figure = read_figure(&out.path().join("detail-iters.figure"));
    assert_eq!(figure.x_label, "Matrix index in the batch");
    assert_eq!(figure.series[0].points, vec![(0.0, 10.0), (1.0, 11.0), (2.0, 12.0)]);
}

#[test]
fn test_residuals_convergence_warning() {
    let batch = BatchDir::new();
    batch.write("detail-1.json", &fixtures::detailed_solver_document(2));
    let out = TempDir::new().unwrap();

    run(&["residuals", "--relative_check", "1e-9"], batch.path(), out.path())
        .success()
        .stderr(predicate::str::contains("DID NOT CONVERGE"))
        .stderr(predicate::str::contains("direct"));

    let figure = read_figure(&out.path().join("detail-relative-resnorms.figure"));
    assert_eq!(figure.y_label, "Log(10) (residual 2-norm / RHS 2-norm)");
}

#[test]
fn test_residuals_absolute_norm() {
    let batch = BatchDir::new();
    batch.write("detail-1.json", &fixtures::detailed_solver_document(2));
    let out = TempDir::new().unwrap();

    run(&["residuals", "--norm_type", "absolute"], batch.path(), out.path())
        .success()
        .stderr(predicate::str::contains("DID NOT CONVERGE").not());
    assert!(out.path().join("detail-absolute-resnorms.figure").exists());
}

#[test]
fn test_speedup_figure() {
    let batch = BatchDir::new();
    batch.write("beta-1.json", &fixtures::solver_document(10, "csr"));
    batch.write("alpha-1.json", &fixtures::solver_document(20, "csr"));
    let out = TempDir::new().unwrap();

    run(&["speedup"], batch.path(), out.path()).success();

    let figure = read_figure(&out.path().join("largest_speedup.figure"));
    assert_eq!(figure.x_ticks, vec!["alpha", "beta"]);
    assert_eq!(figure.series.len(), 2);
    assert!(figure.log_y);
}

#[test]
fn test_speedup_unknown_reference() {
    let batch = solver_batch("case", &[1]);
    let out = TempDir::new().unwrap();

    run(&["speedup", "--reference", "lu"], batch.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("lu"));
}

// ===== abridge and plot-tables =====

#[test]
fn test_abridge_writes_processed_files() {
    let batch = BatchDir::new();
    batch.write("detail-1.json", &fixtures::detailed_solver_document(2));
    batch.write("detail-2.json", &fixtures::detailed_solver_document(4));

    batchbench_cmd()
        .arg("abridge")
        .arg("--dir")
        .arg(batch.path())
        .arg("--keep_iters_res")
        .assert()
        .success();

    assert_eq!(
        batch.file_names(),
        [
            "detail-1.json",
            "detail-1.json.processed",
            "detail-2.json",
            "detail-2.json.processed"
        ]
    );
    let text = fs::read_to_string(batch.path().join("detail-2.json.processed")).unwrap();
    assert!(text.contains("\"num_batch_entries\": 4"));
    assert!(text.contains("num_iters"));
}

#[test]
fn test_plot_tables() {
    let cpu = solver_batch("case", &[8, 4]);
    let out = TempDir::new().unwrap();
    run(&["table", "--processor", "CPU"], cpu.path(), out.path()).success();
    let cpu_table = out.path().join("cpu.txt");
    fs::rename(out.path().join("case.txt"), &cpu_table).unwrap();
    run(&["table", "--processor", "GPU"], cpu.path(), out.path()).success();
    let gpu_table = out.path().join("case.txt");

    batchbench_cmd()
        .arg("plot-tables")
        .arg(&cpu_table)
        .arg(&gpu_table)
        .arg("--output_dir")
        .arg(out.path())
        .assert()
        .success();

    let figure = read_figure(&out.path().join("timings.figure"));
    let labels: Vec<&str> = figure.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "CPU,direct,csr",
            "CPU,bicgstab,csr",
            "CPU,gmres,csr",
            "GPU,direct,csr",
            "GPU,bicgstab,csr",
            "GPU,gmres,csr"
        ]
    );
    for (i, series) in figure.series.iter().enumerate() {
        let solver = i % fixtures::SOLVERS.len();
        assert_eq!(
            series.points,
            vec![
                (4.0, kernel_time(4, solver)),
                (8.0, kernel_time(8, solver))
            ]
        );
    }
    assert_eq!(figure.series[0].style.marker, "+");
    assert_eq!(figure.series[1].style.marker, ".");
}

#[test]
fn test_plot_tables_missing_file() {
    let out = TempDir::new().unwrap();
    batchbench_cmd()
        .arg("plot-tables")
        .arg(out.path().join("absent.txt"))
        .arg("--output_dir")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.txt"));
}
