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

//! Timing table commands.

use super::CommonArgs;
use crate::commands;
use crate::error::CliError;
use batchbench_core::export::TimeUnit;
use batchbench_core::{ExportLabels, NormType, PlotOptions, PlotStyle, RunType};
use clap::Subcommand;
use std::path::PathBuf;

/// Table export commands.
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Write one timing table per case
    ///
    /// Writes `<case>.txt` with the columns `processor case_name solver_type
    /// matrix_format tolerance_type batch_size solve_time`, sorted by batch
    /// size within each solver.
    Table {
        #[command(flatten)]
        common: CommonArgs,

        /// Tolerance type recorded in the table (absolute, relative)
        #[arg(long = "norm_type", visible_alias = "norm-type", default_value = "relative")]
        norm_type: NormType,

        /// Matrix format recorded in the table; defaults to each solver's own format
        #[arg(long = "matrix_format", visible_alias = "matrix-format")]
        matrix_format: Option<String>,

        /// Processor the runs were performed on
        #[arg(long, default_value = "CPU")]
        processor: String,

        /// Run-type section to read (spmv, batch_solver)
        #[arg(long = "run_type", visible_alias = "run-type", default_value = "batch_solver")]
        run_type: RunType,
    },

    /// Plot several timing tables in one figure
    ///
    /// Writes `timings.figure` with one series per table, labelled
    /// `processor,solver_type,matrix_format`.
    PlotTables {
        /// Table files written by `table`
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Directory the figure is written to
        #[arg(long = "output_dir", visible_alias = "output-dir", default_value = ".")]
        output_dir: PathBuf,

        /// Logarithmic time axis
        #[arg(long)]
        log: bool,

        /// Time unit (s, ms)
        #[arg(long, default_value = "s")]
        unit: TimeUnit,
    },
}

impl ExportCommands {
    /// Execute the export command.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            ExportCommands::Table {
                common,
                norm_type,
                matrix_format,
                processor,
                run_type,
            } => {
                let labels = ExportLabels {
                    processor,
                    norm_type,
                    matrix_format,
                };
                let config = common.pipeline(Some(run_type), false);
                commands::table(&common, config, &labels, verbose)
            }
            ExportCommands::PlotTables {
                files,
                output_dir,
                log,
                unit,
            } => {
                let options = PlotOptions {
                    unit,
                    log_y: log,
                    style: PlotStyle::paired(),
                    ..PlotOptions::default()
                };
                commands::plot_tables(&files, &output_dir, &options)
            }
        }
    }
}
