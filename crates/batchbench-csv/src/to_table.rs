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

//! Write timing tables.

use crate::error::{Result, TableError};
use batchbench_core::TableRecord;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column names of a timing table, in output order.
pub const TABLE_COLUMNS: [&str; 7] = [
    "processor",
    "case_name",
    "solver_type",
    "matrix_format",
    "tolerance_type",
    "batch_size",
    "solve_time",
];

/// Extension of table files.
pub const TABLE_EXTENSION: &str = "txt";

/// Configuration for table output.
#[derive(Debug, Clone)]
pub struct ToTableConfig {
    /// Field delimiter (default: ' ')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToTableConfig {
    fn default() -> Self {
        Self {
            delimiter: b' ',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// Render table records as a whitespace-separated string.
///
/// # Example
/// ```
/// use batchbench_core::TableRecord;
/// use batchbench_csv::to_table;
///
/// let rows = vec![TableRecord {
///     processor: "CPU".into(),
///     case_name: "case7".into(),
///     solver_type: "gmres".into(),
///     matrix_format: "csr".into(),
///     tolerance_type: "relative".into(),
///     batch_size: 50,
///     solve_time: 0.9,
/// }];
///
/// let table = to_table(&rows).unwrap();
/// assert_eq!(
///     table,
///     "processor case_name solver_type matrix_format tolerance_type batch_size solve_time\n\
///      CPU case7 gmres csr relative 50 0.9\n"
/// );
/// ```
pub fn to_table(records: &[TableRecord]) -> Result<String> {
    to_table_with_config(records, ToTableConfig::default())
}

/// Render table records with a custom configuration.
pub fn to_table_with_config(records: &[TableRecord], config: ToTableConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(64 * (records.len() + 1));
    to_table_writer_with_config(records, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|_| TableError::InvalidUtf8 {
        context: "table output".to_string(),
    })
}

/// Write table records to a writer.
pub fn to_table_writer<W: Write>(records: &[TableRecord], writer: W) -> Result<()> {
    to_table_writer_with_config(records, writer, ToTableConfig::default())
}

/// Write table records to a writer with a custom configuration.
pub fn to_table_writer_with_config<W: Write>(
    records: &[TableRecord],
    writer: W,
    config: ToTableConfig,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(writer);

    if config.include_headers {
        wtr.write_record(TABLE_COLUMNS).map_err(|e| {
            TableError::Other(format!("Failed to write table header: {}", e))
        })?;
    }

    for (row, record) in records.iter().enumerate() {
        let batch_size = record.batch_size.to_string();
        let solve_time = record.solve_time.to_string();
        let fields = [
            record.processor.as_str(),
            record.case_name.as_str(),
            record.solver_type.as_str(),
            record.matrix_format.as_str(),
            record.tolerance_type.as_str(),
            batch_size.as_str(),
            solve_time.as_str(),
        ];
        wtr.write_record(fields).map_err(|e| {
            TableError::Other(format!(
                "Failed to write table row {} of case '{}': {}",
                row + 1,
                record.case_name,
                e
            ))
        })?;
    }

    wtr.flush()
        .map_err(|e| TableError::Other(format!("Failed to flush table writer: {}", e)))?;

    Ok(())
}

/// Path of the table file of a case inside `dir`: `<dir>/<case_name>.txt`.
pub fn table_path(dir: &Path, case_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", case_name, TABLE_EXTENSION))
}

/// Write the table of one case to `<dir>/<case_name>.txt` and return the path.
pub fn write_table_file(dir: &Path, case_name: &str, records: &[TableRecord]) -> Result<PathBuf> {
    let path = table_path(dir, case_name);
    let file = File::create(&path)?;
    to_table_writer(records, file)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(processor: &str, size: u64, time: f64) -> TableRecord {
        TableRecord {
            processor: processor.to_string(),
            case_name: "case7".to_string(),
            solver_type: "bicgstab".to_string(),
            matrix_format: "ell".to_string(),
            tolerance_type: "absolute".to_string(),
            batch_size: size,
            solve_time: time,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let table = to_table(&[row("CPU", 8, 0.25), row("CPU", 16, 1e-5)]).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], TABLE_COLUMNS.join(" "));
        assert_eq!(lines[1], "CPU case7 bicgstab ell absolute 8 0.25");
        assert_eq!(lines[2], "CPU case7 bicgstab ell absolute 16 0.00001");
    }

    #[test]
    fn test_fields_with_spaces_are_quoted() {
        let table = to_table(&[row("AMD EPYC", 1, 0.5)]).unwrap();
        assert!(table.lines().nth(1).unwrap().starts_with("\"AMD EPYC\" "));
    }

    #[test]
    fn test_without_headers() {
        let config = ToTableConfig {
            include_headers: false,
            ..ToTableConfig::default()
        };
        let table = to_table_with_config(&[row("CPU", 1, 0.5)], config).unwrap();
        assert_eq!(table.lines().count(), 1);
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = to_table(&[]).unwrap();
        assert_eq!(table.trim_end(), TABLE_COLUMNS.join(" "));
    }

    #[test]
    fn test_table_path() {
        assert_eq!(
            table_path(Path::new("out"), "case7"),
            PathBuf::from("out/case7.txt")
        );
    }
}
