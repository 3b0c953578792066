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

//! Co-sort benchmarks.
//!
//! Measures the selection co-sort on reversed batch-size sequences with
//! record rows and with dense dependent columns.

use batchbench_core::cosort::{co_sort, DependentColumns};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn reversed(n: usize) -> Vec<u64> {
    (0..n as u64).rev().collect()
}

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("co_sort_dense");

    for n in [16usize, 64, 256] {
        let columns: Vec<Vec<f64>> = (0..4)
            .map(|col| (0..n).map(|i| (i * col) as f64).collect())
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut primary = reversed(n);
                let mut rows = DependentColumns::from_columns(&columns).unwrap();
                co_sort(black_box(&mut primary), &mut rows).unwrap();
                rows
            })
        });
    }

    group.finish();
}

fn bench_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("co_sort_rows");

    for n in [16usize, 64, 256] {
        let labels: Vec<String> = (0..n).map(|i| format!("run-{}", i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut primary = reversed(n);
                let mut rows = labels.clone();
                co_sort(black_box(&mut primary), &mut rows).unwrap();
                rows
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dense, bench_rows);
criterion_main!(benches);
