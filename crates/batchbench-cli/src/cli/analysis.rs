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

//! Figure commands reading a batch directory.

use super::CommonArgs;
use crate::commands;
use crate::error::CliError;
use batchbench_core::export::{SeriesLabel, TimeUnit};
use batchbench_core::speedup::DEFAULT_REFERENCE;
use batchbench_core::{NormType, PlotOptions, RunType};
use clap::Subcommand;

/// Analysis commands.
///
/// Each command ingests every `*.json` document of `--dir` and writes one
/// JSON figure per case (or one for the whole directory) to `--output_dir`.
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Plot kernel time against batch size for every case
    ///
    /// Writes `<case>-timings.figure` with one series per solver (or per
    /// matrix format with `--by_matrix_format`).
    Timings {
        #[command(flatten)]
        common: CommonArgs,

        /// Run-type section to read (spmv, batch_solver); omit for abridged flat documents
        #[arg(long = "run_type", visible_alias = "run-type")]
        run_type: Option<RunType>,

        /// Logarithmic time axis
        #[arg(long)]
        log: bool,

        /// Split and label series by matrix format
        #[arg(long = "by_matrix_format", visible_alias = "by-matrix-format")]
        by_matrix_format: bool,

        /// Time unit (s, ms)
        #[arg(long, default_value = "s")]
        unit: TimeUnit,
    },

    /// Plot solver iterations per batch entry
    ///
    /// Writes `<case>-iters.figure`.
    Iters {
        #[command(flatten)]
        common: CommonArgs,

        /// Run-type section to read
        #[arg(long = "run_type", visible_alias = "run-type", default_value = "batch_solver")]
        run_type: RunType,
    },

    /// Plot log10 residual norms per batch entry
    ///
    /// Writes `<case>-<norm>-resnorms.figure` and reports every solver whose
    /// largest relative residual exceeds `--relative_check`.
    Residuals {
        #[command(flatten)]
        common: CommonArgs,

        /// Run-type section to read
        #[arg(long = "run_type", visible_alias = "run-type", default_value = "batch_solver")]
        run_type: RunType,

        /// Residual norm (absolute, relative)
        #[arg(long = "norm_type", visible_alias = "norm-type", default_value = "relative")]
        norm_type: NormType,

        /// Convergence threshold for relative norms (0 disables the check)
        #[arg(long = "relative_check", visible_alias = "relative-check", default_value_t = 0.0)]
        relative_check: f64,
    },

    /// Plot the speedup of every solver over a reference solver
    ///
    /// Expects one document per case and writes `largest_speedup.figure`.
    Speedup {
        #[command(flatten)]
        common: CommonArgs,

        /// Reference solver
        #[arg(long, default_value = DEFAULT_REFERENCE)]
        reference: String,
    },
}

impl AnalysisCommands {
    /// Execute the analysis command.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            AnalysisCommands::Timings {
                common,
                run_type,
                log,
                by_matrix_format,
                unit,
            } => {
                let options = PlotOptions {
                    unit,
                    log_y: log,
                    label_by: if by_matrix_format {
                        SeriesLabel::MatrixFormat
                    } else {
                        SeriesLabel::Variant
                    },
                    ..PlotOptions::default()
                };
                let config = common.pipeline(run_type, by_matrix_format);
                commands::timings(&common, config, &options, verbose)
            }
            AnalysisCommands::Iters { common, run_type } => {
                commands::iters(&common, common.pipeline(Some(run_type), false), verbose)
            }
            AnalysisCommands::Residuals {
                common,
                run_type,
                norm_type,
                relative_check,
            } => commands::residuals(
                &common,
                common.pipeline(Some(run_type), false),
                norm_type,
                relative_check,
                verbose,
            ),
            AnalysisCommands::Speedup { common, reference } => commands::speedup(
                &common,
                common.pipeline(Some(RunType::BatchSolver), false),
                &reference,
                verbose,
            ),
        }
    }
}
