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

//! Error types for timing table export and parsing.

use thiserror::Error;

/// Timing table error types.
///
/// # Examples
///
/// ```
/// use batchbench_csv::TableError;
///
/// let err = TableError::TypeMismatch {
///     column: "batch_size".to_string(),
///     expected: "integer".to_string(),
///     value: "many".to_string(),
/// };
///
/// assert_eq!(
///     err.to_string(),
///     "Type mismatch in column 'batch_size': expected integer, got 'many'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum TableError {
    /// Table parsing error at a specific line.
    #[error("Table parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based, header excluded).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// A field could not be converted to its column's type.
    #[error("Type mismatch in column '{column}': expected {expected}, got '{value}'")]
    TypeMismatch {
        /// Column name where the mismatch occurred.
        column: String,
        /// Expected type description.
        expected: String,
        /// Actual value that failed to convert.
        value: String,
    },

    /// A required column is absent from the header.
    ///
    /// ```
    /// use batchbench_csv::TableError;
    ///
    /// let err = TableError::MissingColumn("solve_time".to_string());
    /// assert_eq!(err.to_string(), "Missing required column: solve_time");
    /// ```
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Row count exceeded the configured limit.
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Actual row count encountered.
        actual: usize,
    },

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// What was being produced.
        context: String,
    },

    /// I/O error while reading or writing a table file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// Generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
