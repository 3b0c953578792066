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

//! Document maintenance commands.

use crate::batch::BatchConfig;
use crate::commands;
use crate::error::CliError;
use batchbench_json::AbridgeOptions;
use clap::Subcommand;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Utility commands.
#[derive(Subcommand)]
pub enum UtilityCommands {
    /// Strip detailed per-entry data from solver documents
    ///
    /// Writes `<file>.processed` next to every `*.json` document of `--dir`,
    /// keeping the timing data only.
    Abridge {
        /// Directory holding the benchmark documents
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Process files on a thread pool
        #[arg(long)]
        parallel: bool,

        /// Worker threads for `--parallel` (default: one per core)
        #[arg(long, requires = "parallel")]
        threads: Option<NonZeroUsize>,

        /// Keep per-entry iteration counts and residual norms
        #[arg(long = "keep_iters_res", visible_alias = "keep-iters-res")]
        keep_iters_res: bool,
    },
}

impl UtilityCommands {
    /// Execute the utility command.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            UtilityCommands::Abridge {
                dir,
                parallel,
                threads,
                keep_iters_res,
            } => {
                let config = BatchConfig {
                    parallel,
                    max_threads: threads.map(NonZeroUsize::get),
                    verbose,
                    ..BatchConfig::default()
                };
                commands::abridge(&dir, config, AbridgeOptions { keep_iters_res })
            }
        }
    }
}
