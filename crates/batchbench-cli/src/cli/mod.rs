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

//! CLI command definitions and argument parsing.
//!
//! Commands are organized into the following modules:
//!
//! - [`analysis`]: figures read from a batch directory (timings, iters,
//!   residuals, speedup)
//! - [`export`]: timing tables (table, plot-tables)
//! - [`utility`]: document maintenance (abridge)
//!
//! Every multi-word flag is spelled with underscores (`--output_dir`) and
//! also accepted in kebab case (`--output-dir`).

mod analysis;
mod export;
mod utility;

use crate::batch::BatchConfig;
use crate::error::CliError;
use batchbench_core::{FilenameConvention, PipelineConfig, RunType};
use clap::{Args, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub use analysis::AnalysisCommands;
pub use export::ExportCommands;
pub use utility::UtilityCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Analysis (timings, iters, residuals, speedup)
/// ├── Export (table, plot-tables)
/// └── Utility (abridge)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Analysis(AnalysisCommands),

    #[command(flatten)]
    Export(ExportCommands),

    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command. `verbose` enables per-file progress output.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of the run; outputs written for earlier
    /// cases stay on disk.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            Commands::Analysis(cmd) => cmd.execute(verbose),
            Commands::Export(cmd) => cmd.execute(verbose),
            Commands::Utility(cmd) => cmd.execute(verbose),
        }
    }
}

/// Options shared by every command that reads a batch directory.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory holding the benchmark documents
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Directory the outputs are written to
    #[arg(long = "output_dir", visible_alias = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Filename convention: dashed (`case-4.json`) or prefixed (`case_s4.json`)
    #[arg(long, default_value = "dashed")]
    pub convention: FilenameConvention,

    /// Extract files on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for `--parallel` (default: one per core)
    #[arg(long, requires = "parallel")]
    pub threads: Option<NonZeroUsize>,
}

impl CommonArgs {
    /// Pipeline configuration for this run.
    pub fn pipeline(
        &self,
        selector: Option<RunType>,
        group_by_matrix_format: bool,
    ) -> PipelineConfig {
        PipelineConfig {
            selector,
            convention: self.convention,
            group_by_matrix_format,
            max_file_size: crate::commands::max_file_size(),
            ..PipelineConfig::default()
        }
    }

    /// Batch processing configuration for this run.
    pub fn batch(&self, verbose: bool) -> BatchConfig {
        BatchConfig {
            parallel: self.parallel,
            max_threads: self.threads.map(NonZeroUsize::get),
            verbose,
            ..BatchConfig::default()
        }
    }
}
