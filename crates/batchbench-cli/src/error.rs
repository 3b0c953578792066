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

//! Structured error types for the BatchBench CLI.
//!
//! All command handlers return `Result<T, CliError>`; `main` prints the error
//! as `Error: <message>` and exits with status 1.

use batchbench_core::BenchError;
use batchbench_csv::TableError;
use batchbench_json::JsonExportError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// Implements `Clone` so per-file failures can be carried out of parallel
/// workers and reported in discovery order.
///
/// # Examples
///
/// ```rust,no_run
/// use batchbench_cli::error::CliError;
///
/// fn make_dir(path: &str) -> Result<(), CliError> {
///     std::fs::create_dir_all(path).map_err(|e| CliError::io_error(path, e))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Extraction, grouping or ordering failed.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// I/O operation failed (directory creation, file write).
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Timing table export or parsing error.
    #[error("Table error: {0}")]
    Table(String),

    /// JSON output error.
    #[error("JSON output error: {0}")]
    Json(String),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<TableError> for CliError {
    fn from(err: TableError) -> Self {
        CliError::Table(err.to_string())
    }
}

impl From<JsonExportError> for CliError {
    fn from(err: JsonExportError) -> Self {
        match err {
            JsonExportError::Document(inner) => CliError::Bench(inner),
            other => CliError::Json(other.to_string()),
        }
    }
}
