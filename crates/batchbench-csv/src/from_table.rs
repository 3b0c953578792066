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

//! Read timing tables back into records.

use crate::error::{Result, TableError};
use crate::to_table::TABLE_COLUMNS;
use batchbench_core::TableRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default maximum number of rows read from one table.
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for table parsing.
#[derive(Debug, Clone)]
pub struct FromTableConfig {
    /// Field delimiter (default: ' ')
    pub delimiter: u8,
    /// Trim whitespace around fields (default: true)
    pub trim: bool,
    /// Maximum number of data rows (default: 1,000,000)
    pub max_rows: usize,
}

impl Default for FromTableConfig {
    fn default() -> Self {
        Self {
            delimiter: b' ',
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Header names written by older tools, indexed like [`TABLE_COLUMNS`].
const LEGACY_COLUMNS: [&str; 7] = [
    "processor",
    "case name",
    "solver type",
    "matrix format",
    "tolerance type",
    "batch size",
    "solve time (s)",
];

/// Positions of the table columns in a parsed header.
struct ColumnIndex([usize; 7]);

impl ColumnIndex {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let mut index = [0usize; 7];
        for (slot, (name, legacy)) in TABLE_COLUMNS.iter().zip(LEGACY_COLUMNS).enumerate() {
            index[slot] = header
                .iter()
                .position(|h| h == *name || h == legacy)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        }
        Ok(Self(index))
    }

    fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        slot: usize,
        line: usize,
    ) -> Result<&'r str> {
        record.get(self.0[slot]).ok_or_else(|| TableError::ParseError {
            line,
            message: format!("row has no '{}' field", TABLE_COLUMNS[slot]),
        })
    }
}

/// Parse a timing table from a string.
///
/// Columns are matched by name, so their order does not matter.
///
/// # Example
/// ```
/// use batchbench_csv::from_table;
///
/// let text = "processor case_name solver_type matrix_format tolerance_type batch_size solve_time\n\
///             CPU case7 gmres csr relative 50 0.9\n";
/// let rows = from_table(text).unwrap();
/// assert_eq!(rows[0].batch_size, 50);
/// assert_eq!(rows[0].solve_time, 0.9);
/// ```
pub fn from_table(text: &str) -> Result<Vec<TableRecord>> {
    from_table_reader(text.as_bytes(), FromTableConfig::default())
}

/// Parse a timing table from a reader.
pub fn from_table_reader<R: Read>(reader: R, config: FromTableConfig) -> Result<Vec<TableRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let columns = ColumnIndex::from_header(rdr.headers()?)?;
    let mut rows = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        if idx >= config.max_rows {
            return Err(TableError::SecurityLimit {
                limit: config.max_rows,
                actual: idx + 1,
            });
        }

        let line = idx + 1;
        let record = result.map_err(|e| TableError::ParseError {
            line,
            message: e.to_string(),
        })?;

        if record.iter().all(str::is_empty) {
            continue;
        }

        let batch_text = columns.field(&record, 5, line)?;
        let batch_size = batch_text
            .parse::<u64>()
            .map_err(|_| TableError::TypeMismatch {
                column: TABLE_COLUMNS[5].to_string(),
                expected: "non-negative integer".to_string(),
                value: batch_text.to_string(),
            })?;

        let time_text = columns.field(&record, 6, line)?;
        let solve_time = time_text
            .parse::<f64>()
            .map_err(|_| TableError::TypeMismatch {
                column: TABLE_COLUMNS[6].to_string(),
                expected: "number".to_string(),
                value: time_text.to_string(),
            })?;

        rows.push(TableRecord {
            processor: columns.field(&record, 0, line)?.to_string(),
            case_name: columns.field(&record, 1, line)?.to_string(),
            solver_type: columns.field(&record, 2, line)?.to_string(),
            matrix_format: columns.field(&record, 3, line)?.to_string(),
            tolerance_type: columns.field(&record, 4, line)?.to_string(),
            batch_size,
            solve_time,
        });
    }

    Ok(rows)
}

/// Read a table file written by [`write_table_file`](crate::write_table_file).
pub fn read_table_file(path: &Path) -> Result<Vec<TableRecord>> {
    let file = File::open(path)?;
    from_table_reader(BufReader::new(file), FromTableConfig::default())
}
