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

//! Per-entry iteration and residual figures.

use super::{figure_sink, write_figure, Batch};
use crate::batch::{ProfileKind, ProfileOperation};
use crate::cli::CommonArgs;
use crate::error::CliError;
use batchbench_core::profile::{check_convergence, iterations_figure, residuals_figure};
use batchbench_core::{CaseFile, EntryProfile, NormType, PipelineConfig, PlotStyle};
use colored::Colorize;
use std::collections::BTreeMap;
use tracing::warn;

/// Read the profiles of every file, keyed by case name.
///
/// A case with several files keeps the profiles of the last one in
/// discovery order.
fn case_profiles(
    common: &CommonArgs,
    config: PipelineConfig,
    kind: ProfileKind,
    verbose: bool,
) -> Result<BTreeMap<String, Vec<EntryProfile>>, CliError> {
    let batch = Batch::open(common, config, verbose)?;
    let outputs: Vec<(CaseFile, Vec<EntryProfile>)> = batch
        .processor
        .process(&batch.files, ProfileOperation::new(&batch.ingestor, kind), verbose)
        .into_outputs()?;

    let mut cases = BTreeMap::new();
    for (case, profiles) in outputs {
        if cases.insert(case.case_name.clone(), profiles).is_some() {
            warn!(
                "Several files for case {}; keeping batch multiplier {}",
                case.case_name, case.batch_multiplier
            );
        }
    }
    Ok(cases)
}

/// Write `<case>-iters.figure` for every case of the batch directory.
pub fn iters(common: &CommonArgs, config: PipelineConfig, verbose: bool) -> Result<(), CliError> {
    let cases = case_profiles(common, config, ProfileKind::Iterations, verbose)?;
    let mut sink = figure_sink(&common.output_dir)?;
    let style = PlotStyle::default();

    for (case_name, profiles) in &cases {
        write_figure(&mut sink, &iterations_figure(case_name, profiles, &style))?;
    }

    Ok(())
}

/// Write `<case>-<norm>-resnorms.figure` for every case of the batch directory.
///
/// With a relative norm and a non-zero `relative_check`, every solver whose
/// largest relative residual exceeds the threshold is reported. Failing
/// solvers do not stop the run.
pub fn residuals(
    common: &CommonArgs,
    config: PipelineConfig,
    norm: NormType,
    relative_check: f64,
    verbose: bool,
) -> Result<(), CliError> {
    if relative_check < 0.0 || !relative_check.is_finite() {
        return Err(CliError::invalid_input(format!(
            "relative_check must be a non-negative number, got {}",
            relative_check
        )));
    }

    let cases = case_profiles(common, config, ProfileKind::Residuals(norm), verbose)?;
    let mut sink = figure_sink(&common.output_dir)?;
    let style = PlotStyle::default();

    for (case_name, profiles) in &cases {
        if norm == NormType::Relative {
            for failure in check_convergence(profiles, relative_check) {
                warn!("{}", failure);
                eprintln!("{}", failure.to_string().red().bold());
            }
        }
        write_figure(
            &mut sink,
            &residuals_figure(case_name, profiles, norm, &style),
        )?;
    }

    Ok(())
}
