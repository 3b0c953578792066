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

//! Speedup over a reference solver.

use super::{figure_sink, write_figure, Batch};
use crate::cli::CommonArgs;
use crate::error::CliError;
use batchbench_core::{PipelineConfig, PlotStyle, SpeedupTable};
use colored::Colorize;

/// Write `largest_speedup.figure` comparing every solver with `reference`.
///
/// Expects one document per case; the summary is also printed as a table.
pub fn speedup(
    common: &CommonArgs,
    config: PipelineConfig,
    reference: &str,
    verbose: bool,
) -> Result<(), CliError> {
    let batch = Batch::open(common, config, verbose)?;
    let records: Vec<_> = batch
        .extract()?
        .into_iter()
        .flat_map(|file| file.records)
        .collect();

    let table = SpeedupTable::compute(&records, batch.ingestor.keys(), reference)?;

    print!("{:<24}", "case".bright_cyan().bold());
    for variant in table.variants() {
        print!(" {:>12}", variant.bright_cyan().bold());
    }
    println!();
    for case in table.cases() {
        print!("{:<24}", case);
        for variant in table.variants() {
            match table.speedup(variant, case) {
                Some(value) => print!(" {:>12.3}", value),
                None => print!(" {:>12}", "-"),
            }
        }
        println!();
    }

    let mut sink = figure_sink(&common.output_dir)?;
    write_figure(&mut sink, &table.figure(&PlotStyle::default()))?;
    Ok(())
}
