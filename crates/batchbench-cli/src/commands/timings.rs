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

//! Timing figures.

use super::{figure_sink, write_figure, Batch};
use crate::cli::CommonArgs;
use crate::error::CliError;
use batchbench_core::export::timing_figure;
use batchbench_core::{PipelineConfig, PlotOptions};

/// Write `<case>-timings.figure` for every case of the batch directory.
pub fn timings(
    common: &CommonArgs,
    config: PipelineConfig,
    options: &PlotOptions,
    verbose: bool,
) -> Result<(), CliError> {
    let cases = Batch::open(common, config, verbose)?.cases()?;
    let mut sink = figure_sink(&common.output_dir)?;

    for case in &cases {
        write_figure(&mut sink, &timing_figure(case, options))?;
    }

    Ok(())
}
