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

//! Timing table export.

use super::{ensure_output_dir, report_written, Batch};
use crate::cli::CommonArgs;
use crate::error::CliError;
use batchbench_core::export::table_records;
use batchbench_core::{ExportLabels, PipelineConfig, TableRecord};
use batchbench_csv::write_table_file;

/// Write `<case>.txt` for every case of the batch directory.
///
/// Rows are grouped by solver, in key-set order, and sorted by batch size
/// within each solver.
pub fn table(
    common: &CommonArgs,
    config: PipelineConfig,
    labels: &ExportLabels,
    verbose: bool,
) -> Result<(), CliError> {
    let cases = Batch::open(common, config, verbose)?.cases()?;
    ensure_output_dir(&common.output_dir)?;

    for case in &cases {
        let rows: Vec<TableRecord> = case
            .series
            .iter()
            .flat_map(|series| table_records(&case.case_name, series, labels))
            .collect();
        let path = write_table_file(&common.output_dir, &case.case_name, &rows)?;
        report_written(&path);
    }

    Ok(())
}
