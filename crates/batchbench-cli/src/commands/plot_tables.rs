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

//! Combined figure of several timing tables.

use super::{figure_sink, write_figure};
use crate::error::CliError;
use batchbench_core::export::tables_figure;
use batchbench_core::{PlotOptions, TableRecord};
use batchbench_csv::read_table_file;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read every table and write `timings.figure` with one series per table.
pub fn plot_tables(
    files: &[PathBuf],
    output_dir: &Path,
    options: &PlotOptions,
) -> Result<(), CliError> {
    if files.is_empty() {
        return Err(CliError::invalid_input("no table files given"));
    }

    let tables = files
        .iter()
        .map(|path| {
            let rows = read_table_file(path)
                .map_err(|e| CliError::Table(format!("{}: {}", path.display(), e)))?;
            debug!("Read {} rows from {}", rows.len(), path.display());
            Ok((path.display().to_string(), rows))
        })
        .collect::<Result<Vec<(String, Vec<TableRecord>)>, CliError>>()?;

    let figure = tables_figure(&tables, options)?;
    let mut sink = figure_sink(output_dir)?;
    write_figure(&mut sink, &figure)?;
    Ok(())
}
