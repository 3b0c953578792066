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

//! BatchBench Command Line Interface

use batchbench_cli::cli::Commands;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// BatchBench - batched solver benchmark analysis
///
/// Reads a directory of benchmark result documents, orders every solver's
/// measurements by batch size and exports tables and figures.
///
/// # Examples
///
/// ```bash
/// # Timing tables of a GPU run
/// batchbench table --dir results --processor GPU --output_dir tables
///
/// # Timing figures in milliseconds on a log axis
/// batchbench timings --dir results --unit ms --log
///
/// # Residual figures, flagging solvers above 1e-8
/// batchbench residuals --dir results --relative_check 1e-8
/// ```
#[derive(Parser)]
#[command(name = "batchbench")]
#[command(author, version, long_about = None)]
#[command(about = "BatchBench - batched solver benchmark analysis")]
struct Cli {
    /// Log every file and record (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "batchbench=debug"
    } else {
        "batchbench=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.execute(cli.verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
