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

//! In-place co-sorting of a primary key sequence and its dependent rows.
//!
//! The primary sequence (batch sizes) is sorted ascending by repeatedly moving
//! the largest remaining element to the end of the unsorted prefix. Every swap
//! applied to the primary sequence is applied to the dependent rows as well,
//! so row `i` always stays paired with primary element `i`.
//!
//! The algorithm is quadratic. Series hold one point per batch file, which
//! keeps N small enough that this never matters.

use crate::error::{BenchError, Result};

/// Row storage that can exchange two rows in place.
///
/// Implemented for slices and vectors of any row type (e.g. records) and for
/// the dense [`DependentColumns`] matrix.
pub trait RowSwap {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Exchange rows `a` and `b`. Both indices are below [`row_count`](Self::row_count).
    fn swap_rows(&mut self, a: usize, b: usize);
}

impl<R> RowSwap for [R] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }
}

impl<R> RowSwap for Vec<R> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }
}

/// A dense N×M matrix of dependent values stored row-major.
///
/// # Examples
///
/// ```
/// use batchbench_core::cosort::{co_sort, DependentColumns};
///
/// let mut primary = vec![30u64, 10, 20];
/// let mut rows = DependentColumns::from_rows(vec![vec![1.0], vec![3.0], vec![2.0]]).unwrap();
///
/// co_sort(&mut primary, &mut rows).unwrap();
///
/// assert_eq!(primary, [10, 20, 30]);
/// assert_eq!(rows.to_rows(), vec![vec![3.0], vec![2.0], vec![1.0]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DependentColumns {
    data: Vec<f64>,
    rows: usize,
    width: usize,
}

impl DependentColumns {
    /// Build a matrix from rows that must all have the same width.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::ShapeMismatch`] when a row's width differs from
    /// the first row's.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut data = Vec::with_capacity(height * width);

        for row in rows {
            if row.len() != width {
                return Err(BenchError::shape_mismatch("columns", width, row.len()));
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            rows: height,
            width,
        })
    }

    /// Build a matrix from column vectors that must all have the same length.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let height = columns.first().map_or(0, Vec::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != height) {
            return Err(BenchError::shape_mismatch("rows", height, bad.len()));
        }

        let width = columns.len();
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            data.extend(columns.iter().map(|column| column[row]));
        }
        Ok(Self {
            data,
            rows: height,
            width,
        })
    }

    /// Number of dependent columns (M).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Row `index`, if in range.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Column `index` as a vector, if in range.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.width {
            return None;
        }
        Some(self.data.iter().skip(index).step_by(self.width).copied().collect())
    }

    /// Copy the matrix out as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|i| self.data[i * self.width..(i + 1) * self.width].to_vec())
            .collect()
    }
}

impl RowSwap for DependentColumns {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b || self.width == 0 {
            return;
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(high * self.width);
        head[low * self.width..(low + 1) * self.width].swap_with_slice(&mut tail[..self.width]);
    }
}

/// Sort `primary` ascending and apply the same permutation to `dependent`.
///
/// For each pass `i` the first index holding the largest value of the
/// unsorted prefix `0..N-i` is swapped, together with its row, into position
/// `N-i-1`. Equal primary values keep the order this produces.
///
/// # Errors
///
/// Returns [`BenchError::ShapeMismatch`] when `dependent` does not have one
/// row per primary element. Neither buffer is touched in that case.
pub fn co_sort<K, D>(primary: &mut [K], dependent: &mut D) -> Result<()>
where
    K: PartialOrd,
    D: RowSwap + ?Sized,
{
    let n = primary.len();
    if dependent.row_count() != n {
        return Err(BenchError::shape_mismatch("rows", n, dependent.row_count()));
    }

    for i in 0..n.saturating_sub(1) {
        let end = n - i;
        let mut max_idx = 0;
        for j in 0..end {
            if primary[j] > primary[max_idx] {
                max_idx = j;
            }
        }

        let last = end - 1;
        primary.swap(max_idx, last);
        dependent.swap_rows(max_idx, last);
    }

    Ok(())
}

/// Whether a sequence is non-decreasing.
pub fn is_sorted<K: PartialOrd>(values: &[K]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
