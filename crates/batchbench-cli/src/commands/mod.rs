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

//! CLI command implementations

mod abridge;
mod plot_tables;
mod profiles;
mod speedup;
mod table;
mod timings;

pub use abridge::abridge;
pub use plot_tables::plot_tables;
pub use profiles::{iters, residuals};
pub use speedup::speedup;
pub use table::table;
pub use timings::timings;

use crate::batch::{BatchProcessor, ExtractOperation};
use crate::cli::CommonArgs;
use crate::error::CliError;
use batchbench_core::pipeline::DEFAULT_MAX_FILE_SIZE;
use batchbench_core::{FileRecords, Ingestor, PipelineConfig, PlotFigure, PlotSink, SortedCase};
use batchbench_json::JsonPlotSink;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the largest document read, in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "BATCHBENCH_MAX_FILE_SIZE";

/// Largest document that will be read.
///
/// Reads [`MAX_FILE_SIZE_ENV`] and falls back to [`DEFAULT_MAX_FILE_SIZE`]
/// (1 GiB) when it is unset or not a number.
pub fn max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// The documents of a batch directory together with the state needed to
/// process them.
pub(crate) struct Batch {
    pub files: Vec<PathBuf>,
    pub ingestor: Ingestor,
    pub processor: BatchProcessor,
}

impl Batch {
    /// List the documents of `--dir` and discover the variant keys.
    pub fn open(
        common: &CommonArgs,
        config: PipelineConfig,
        verbose: bool,
    ) -> Result<Self, CliError> {
        let (ingestor, files) = Ingestor::open(config, &common.dir)?;
        Ok(Self {
            files,
            ingestor,
            processor: BatchProcessor::new(common.batch(verbose)),
        })
    }

    /// Extract every file, in discovery order.
    pub fn extract(&self) -> Result<Vec<FileRecords>, CliError> {
        let verbose = self.processor.config().verbose;
        self.processor
            .process(&self.files, ExtractOperation::new(&self.ingestor), verbose)
            .into_outputs()
    }

    /// Extract, group and sort every file.
    pub fn cases(&self) -> Result<Vec<SortedCase>, CliError> {
        let extracted = self.extract()?;
        let cases = self.ingestor.group(extracted).into_sorted()?;
        info!(
            "Grouped {} files into {} cases",
            self.files.len(),
            cases.len()
        );
        Ok(cases)
    }
}

/// Create the output directory if needed.
pub(crate) fn ensure_output_dir(dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|e| CliError::io_error(dir, e))
}

/// Figure sink writing into an existing output directory.
pub(crate) fn figure_sink(dir: &Path) -> Result<JsonPlotSink, CliError> {
    ensure_output_dir(dir)?;
    Ok(JsonPlotSink::new(dir))
}

/// Write one figure and report it.
pub(crate) fn write_figure(
    sink: &mut JsonPlotSink,
    figure: &PlotFigure,
) -> Result<PathBuf, CliError> {
    let path = sink.write_figure(figure)?;
    report_written(&path);
    Ok(path)
}

pub(crate) fn report_written(path: &Path) {
    println!("{} {}", "Wrote".green().bold(), path.display());
}
