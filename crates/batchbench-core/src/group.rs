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

//! Accumulation of records into case → bucket → series.
//!
//! Cases and buckets are kept in first-insertion order, records in the order
//! they were appended (file-discovery order). Sorting happens once, when the
//! grouper is consumed.

use crate::cosort::co_sort;
use crate::error::Result;
use crate::record::BenchmarkRecord;
use crate::series::{SortedCase, SortedSeries};
use std::collections::HashMap;
use tracing::debug;

/// Identity of a series inside a case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    /// Solver or run variant.
    pub variant: String,
    /// Matrix format, when grouping by format.
    pub matrix_format: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct CaseBuckets {
    buckets: Vec<(BucketKey, Vec<BenchmarkRecord>)>,
    index: HashMap<BucketKey, usize>,
}

/// Insertion-ordered grouping of records by case and bucket.
///
/// # Examples
///
/// ```
/// use batchbench_core::{BenchmarkRecord, CaseGroup};
///
/// let record = |batch_size: u64| BenchmarkRecord {
///     case_name: "case7".into(),
///     variant: "gmres".into(),
///     matrix_format: None,
///     batch_size,
///     batch_multiplier: 1,
///     metric_value: batch_size as f64,
///     secondary_metric: None,
/// };
///
/// let mut group = CaseGroup::new(false);
/// group.append(vec![record(64)]);
/// group.append(vec![record(8)]);
///
/// let cases = group.into_sorted().unwrap();
/// assert_eq!(cases[0].series[0].batch_sizes(), vec![8, 64]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaseGroup {
    by_matrix_format: bool,
    cases: Vec<(String, CaseBuckets)>,
    index: HashMap<String, usize>,
}

impl CaseGroup {
    /// Create an empty grouper. With `by_matrix_format` the matrix format is
    /// part of the bucket key; otherwise buckets are per variant only.
    pub fn new(by_matrix_format: bool) -> Self {
        Self {
            by_matrix_format,
            ..Self::default()
        }
    }

    /// Append records, each into the bucket derived from its own fields.
    pub fn append(&mut self, records: impl IntoIterator<Item = BenchmarkRecord>) {
        for record in records {
            self.push(record);
        }
    }

    /// Append one record.
    pub fn push(&mut self, record: BenchmarkRecord) {
        let key = BucketKey {
            variant: record.variant.clone(),
            matrix_format: if self.by_matrix_format {
                record.matrix_format.clone()
            } else {
                None
            },
        };

        let case_idx = match self.index.get(&record.case_name) {
            Some(&idx) => idx,
            None => {
                debug!("New case: {}", record.case_name);
                self.cases
                    .push((record.case_name.clone(), CaseBuckets::default()));
                self.index
                    .insert(record.case_name.clone(), self.cases.len() - 1);
                self.cases.len() - 1
            }
        };

        let buckets = &mut self.cases[case_idx].1;
        let bucket_idx = match buckets.index.get(&key) {
            Some(&idx) => idx,
            None => {
                buckets.buckets.push((key.clone(), Vec::new()));
                buckets.index.insert(key, buckets.buckets.len() - 1);
                buckets.buckets.len() - 1
            }
        };
        buckets.buckets[bucket_idx].1.push(record);
    }

    /// Case names in first-insertion order.
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|(name, _)| name.as_str())
    }

    /// Bucket keys of a case in first-insertion order.
    pub fn buckets(&self, case_name: &str) -> Vec<&BucketKey> {
        self.index
            .get(case_name)
            .map(|&idx| self.cases[idx].1.buckets.iter().map(|(k, _)| k).collect())
            .unwrap_or_default()
    }

    /// Records of one bucket in insertion order.
    pub fn records(&self, case_name: &str, key: &BucketKey) -> Option<&[BenchmarkRecord]> {
        let case = &self.cases[*self.index.get(case_name)?].1;
        let idx = *case.index.get(key)?;
        Some(&case.buckets[idx].1)
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Co-sort every bucket by batch size and return the cases in order.
    pub fn into_sorted(self) -> Result<Vec<SortedCase>> {
        self.cases
            .into_iter()
            .map(|(case_name, buckets)| -> Result<SortedCase> {
                let series = buckets
                    .buckets
                    .into_iter()
                    .map(|(key, mut records)| {
                        let mut sizes: Vec<u64> = records.iter().map(|r| r.batch_size).collect();
                        co_sort(&mut sizes, &mut records)?;
                        SortedSeries::from_sorted(key.variant, key.matrix_format, records)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(SortedCase { case_name, series })
            })
            .collect()
    }
}
