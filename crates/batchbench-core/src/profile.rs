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

//! Per-batch-entry profiles: iteration counts and residual norms.
//!
//! Solver runs report one value per matrix of the batch under `num_iters`,
//! `residual_norm` and `rhs_norm`. A profile is that sequence for one
//! (case, variant), indexed by batch entry.

use crate::document::{section_path, BenchmarkDocument, RunType};
use crate::error::{BenchError, Result};
use crate::export::{PlotFigure, PlotSeries, PlotStyle};
use crate::filename::CaseFile;
use crate::record::{entry_values, EntryField};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How residual norms are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormType {
    /// Residual 2-norm as reported.
    Absolute,
    /// Residual 2-norm divided by the right-hand-side 2-norm.
    #[default]
    Relative,
}

impl NormType {
    /// Axis label of log10 residual figures.
    pub fn axis_label(&self) -> &'static str {
        match self {
            NormType::Absolute => "Log(10) residual 2-norm",
            NormType::Relative => "Log(10) (residual 2-norm / RHS 2-norm)",
        }
    }
}

impl fmt::Display for NormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormType::Absolute => f.write_str("absolute"),
            NormType::Relative => f.write_str("relative"),
        }
    }
}

impl FromStr for NormType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(NormType::Absolute),
            "relative" => Ok(NormType::Relative),
            other => Err(format!(
                "unknown norm type '{}' (expected 'absolute' or 'relative')",
                other
            )),
        }
    }
}

/// Values of one variant for every entry of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryProfile {
    /// Case the document belongs to.
    pub case_name: String,
    /// Solver the values were read from.
    pub variant: String,
    /// One value per batch entry, in entry order.
    pub values: Vec<f64>,
}

impl EntryProfile {
    /// Largest value, `None` for an empty profile.
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Smallest value, `None` for an empty profile.
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// `(entry index, value)` pairs.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

/// Reads entry profiles out of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileExtractor {
    selector: Option<RunType>,
}

impl ProfileExtractor {
    pub fn new(selector: Option<RunType>) -> Self {
        Self { selector }
    }

    /// Iteration counts of one variant.
    pub fn iterations(
        &self,
        doc: &BenchmarkDocument,
        variant: &str,
        file: &CaseFile,
    ) -> Result<EntryProfile> {
        let context = section_path(self.selector, Some(variant));
        let metrics = doc.variant(self.selector, variant)?;
        Ok(EntryProfile {
            case_name: file.case_name.clone(),
            variant: variant.to_string(),
            values: entry_values(metrics, EntryField::Iterations, &context)?,
        })
    }

    /// Residual norms of one variant, relative ones divided element-wise by
    /// the right-hand-side norms.
    ///
    /// # Errors
    ///
    /// Besides missing fields, fails with [`BenchError::ShapeMismatch`] when
    /// `residual_norm` and `rhs_norm` have different entry counts.
    pub fn residuals(
        &self,
        doc: &BenchmarkDocument,
        variant: &str,
        file: &CaseFile,
        norm: NormType,
    ) -> Result<EntryProfile> {
        let context = section_path(self.selector, Some(variant));
        let metrics = doc.variant(self.selector, variant)?;
        let mut values = entry_values(metrics, EntryField::ResidualNorm, &context)?;

        if norm == NormType::Relative {
            let rhs = entry_values(metrics, EntryField::RhsNorm, &context)?;
            if rhs.len() != values.len() {
                return Err(BenchError::shape_mismatch(
                    "rhs_norm entries",
                    values.len(),
                    rhs.len(),
                ));
            }
            for (value, b) in values.iter_mut().zip(&rhs) {
                *value /= b;
            }
        }

        Ok(EntryProfile {
            case_name: file.case_name.clone(),
            variant: variant.to_string(),
            values,
        })
    }
}

/// A variant whose relative residual exceeded the convergence threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceFailure {
    /// Case of the failing run.
    pub case_name: String,
    /// Solver that did not converge.
    pub variant: String,
    /// Largest relative residual norm over the batch.
    pub max_norm: f64,
    /// Threshold it was checked against.
    pub threshold: f64,
}

impl fmt::Display for ConvergenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) DID NOT CONVERGE TO TOLERANCE {} (max relative norm {:e})",
            self.variant, self.case_name, self.threshold, self.max_norm
        )
    }
}

/// Variants whose largest value exceeds `threshold`. A threshold of zero
/// disables the check.
pub fn check_convergence(profiles: &[EntryProfile], threshold: f64) -> Vec<ConvergenceFailure> {
    if threshold == 0.0 {
        return Vec::new();
    }

    profiles
        .iter()
        .filter_map(|profile| {
            let max_norm = profile.max()?;
            (max_norm > threshold).then(|| ConvergenceFailure {
                case_name: profile.case_name.clone(),
                variant: profile.variant.clone(),
                max_norm,
                threshold,
            })
        })
        .collect()
}

fn profile_series(
    profiles: &[EntryProfile],
    style: &PlotStyle,
    map: impl Fn(f64) -> f64,
) -> Vec<PlotSeries> {
    profiles
        .iter()
        .enumerate()
        .map(|(i, profile)| PlotSeries {
            label: profile.variant.clone(),
            style: style.series_style(i),
            points: profile
                .points()
                .into_iter()
                .map(|(x, y)| (x, map(y)))
                .collect(),
        })
        .collect()
}

/// Iterations per batch entry, one series per variant.
pub fn iterations_figure(
    case_name: &str,
    profiles: &[EntryProfile],
    style: &PlotStyle,
) -> PlotFigure {
    let mut figure = PlotFigure::line(
        format!("{}-iters", case_name),
        "Matrix index in the batch",
        "Iterations",
    );
    figure.series = profile_series(profiles, style, |v| v);
    figure
}

/// Log10 residual norms per batch entry, one series per variant.
pub fn residuals_figure(
    case_name: &str,
    profiles: &[EntryProfile],
    norm: NormType,
    style: &PlotStyle,
) -> PlotFigure {
    let mut figure = PlotFigure::line(
        format!("{}-{}-resnorms", case_name, norm),
        "Matrix index in the batch",
        norm.axis_label(),
    );
    figure.series = profile_series(profiles, style, f64::log10);
    figure
}
