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

//! Ordered per-bucket series.

use crate::cosort::is_sorted;
use crate::error::{BenchError, Result};
use crate::record::BenchmarkRecord;
use serde::{Deserialize, Serialize};

/// The records of one (variant, matrix format) bucket, ordered by batch size.
///
/// Only constructed from sorted data, so `batch_sizes()` is always
/// non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedSeries {
    variant: String,
    matrix_format: Option<String>,
    records: Vec<BenchmarkRecord>,
}

impl SortedSeries {
    /// Wrap records that are already in ascending batch-size order.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::ShapeMismatch`] when the records are out of order;
    /// the reported counts are the length of the sorted prefix and the total.
    pub fn from_sorted(
        variant: impl Into<String>,
        matrix_format: Option<String>,
        records: Vec<BenchmarkRecord>,
    ) -> Result<Self> {
        let sizes: Vec<u64> = records.iter().map(|r| r.batch_size).collect();
        if !is_sorted(&sizes) {
            let prefix = sizes.windows(2).take_while(|w| w[0] <= w[1]).count() + 1;
            return Err(BenchError::shape_mismatch(
                "records in batch-size order",
                records.len(),
                prefix,
            ));
        }

        Ok(Self {
            variant: variant.into(),
            matrix_format,
            records,
        })
    }

    /// Variant (solver) of the series.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Matrix format of the bucket, when grouping by format.
    pub fn matrix_format(&self) -> Option<&str> {
        self.matrix_format.as_deref()
    }

    /// Records in ascending batch-size order.
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The independent variable, ascending.
    pub fn batch_sizes(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.batch_size).collect()
    }

    /// Primary metric values aligned with [`batch_sizes`](Self::batch_sizes).
    pub fn metric_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.metric_value).collect()
    }

    /// `(batch_size, metric_value)` pairs.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.batch_size as f64, r.metric_value))
            .collect()
    }
}

/// One case with its sorted series in bucket order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedCase {
    /// Case name.
    pub case_name: String,
    /// Series per bucket, in first-insertion order.
    pub series: Vec<SortedSeries>,
}

impl SortedCase {
    /// The series of one variant (the first bucket of it, when grouping by
    /// matrix format).
    pub fn series_for(&self, variant: &str) -> Option<&SortedSeries> {
        self.series.iter().find(|s| s.variant() == variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(batch_size: u64, metric_value: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            case_name: "case".to_string(),
            variant: "cg".to_string(),
            matrix_format: None,
            batch_size,
            batch_multiplier: 1,
            metric_value,
            secondary_metric: None,
        }
    }

    #[test]
    fn test_accessors() {
        let series =
            SortedSeries::from_sorted("cg", None, vec![record(2, 0.5), record(4, 0.7)]).unwrap();
        assert_eq!(series.variant(), "cg");
        assert_eq!(series.batch_sizes(), vec![2, 4]);
        assert_eq!(series.metric_values(), vec![0.5, 0.7]);
        assert_eq!(series.points(), vec![(2.0, 0.5), (4.0, 0.7)]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_rejects_unsorted() {
        let err = SortedSeries::from_sorted("cg", None, vec![record(4, 0.7), record(2, 0.5)])
            .unwrap_err();
        assert!(matches!(err, BenchError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_series_for() {
        let case = SortedCase {
            case_name: "case".to_string(),
            series: vec![SortedSeries::from_sorted("cg", None, vec![record(1, 0.1)]).unwrap()],
        };
        assert!(case.series_for("cg").is_some());
        assert!(case.series_for("gmres").is_none());
    }
}
