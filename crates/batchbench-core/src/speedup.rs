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

//! Speedup of iterative variants relative to a reference variant.

use crate::discovery::VariantKeySet;
use crate::error::{BenchError, Result};
use crate::export::{FigureKind, PlotFigure, PlotSeries, PlotStyle};
use crate::record::BenchmarkRecord;
use std::collections::BTreeMap;
use tracing::warn;

/// Variant every other variant is compared against by default.
pub const DEFAULT_REFERENCE: &str = "direct";

/// Speedups per (variant, case), cases sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupTable {
    reference: String,
    cases: Vec<String>,
    variants: Vec<String>,
    /// `speedups[v][c]` is the speedup of `variants[v]` on `cases[c]`.
    speedups: Vec<Vec<f64>>,
}

impl SpeedupTable {
    /// Compute `reference time / variant time` of the apply kernel for every
    /// non-reference variant of `keys` on every case.
    ///
    /// Only one record per (case, variant) is used; when a case was run with
    /// several batch multipliers the last record appended wins.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::MissingField`] when the reference is not one of
    /// the discovered variants or a case lacks a record for some variant.
    pub fn compute(
        records: &[BenchmarkRecord],
        keys: &VariantKeySet,
        reference: &str,
    ) -> Result<Self> {
        if !keys.contains(reference) {
            return Err(BenchError::missing_field(
                reference,
                format!("variant set {}", keys),
            ));
        }

        let mut by_case: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
        for record in records {
            let previous = by_case
                .entry(record.case_name.as_str())
                .or_default()
                .insert(record.variant.as_str(), record.metric_value);
            if previous.is_some() {
                warn!(
                    "Several runs of {} for case {}, using the last one",
                    record.variant, record.case_name
                );
            }
        }

        let variants: Vec<String> = keys
            .iter()
            .filter(|key| *key != reference)
            .map(str::to_string)
            .collect();
        let cases: Vec<String> = by_case.keys().map(|c| c.to_string()).collect();

        let mut speedups = vec![Vec::with_capacity(cases.len()); variants.len()];
        for (case, times) in &by_case {
            let lookup = |variant: &str| {
                times
                    .get(variant)
                    .copied()
                    .ok_or_else(|| BenchError::missing_field(variant, *case))
            };
            let reference_time = lookup(reference)?;
            for (row, variant) in speedups.iter_mut().zip(&variants) {
                row.push(reference_time / lookup(variant)?);
            }
        }

        Ok(Self {
            reference: reference.to_string(),
            cases,
            variants,
            speedups,
        })
    }

    /// Variant every other variant is compared with.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Case names in ascending order.
    pub fn cases(&self) -> &[String] {
        &self.cases
    }

    /// Compared variants in key-set order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Speedup of a variant on a case.
    pub fn speedup(&self, variant: &str, case: &str) -> Option<f64> {
        let v = self.variants.iter().position(|x| x == variant)?;
        let c = self.cases.iter().position(|x| x == case)?;
        Some(self.speedups[v][c])
    }

    /// Grouped bar figure `largest_speedup` with a log y axis.
    pub fn figure(&self, style: &PlotStyle) -> PlotFigure {
        let mut figure = PlotFigure::line(
            "largest_speedup",
            "Problem",
            format!("Speedup w.r.t. {} solver", self.reference),
        );
        figure.kind = FigureKind::Bar;
        figure.log_y = true;
        figure.x_ticks = self.cases.clone();
        figure.series = self
            .variants
            .iter()
            .zip(&self.speedups)
            .enumerate()
            .map(|(i, (variant, values))| PlotSeries {
                label: variant.clone(),
                style: style.series_style(i),
                points: values
                    .iter()
                    .enumerate()
                    .map(|(c, s)| (c as f64, *s))
                    .collect(),
            })
            .collect();
        figure
    }
}
