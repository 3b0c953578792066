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

//! Error types for the benchmark extraction pipeline.
//!
//! Every failure in the pipeline is fatal for the current run: callers surface
//! the first error and stop. The variants mirror the stages that can fail
//! (pattern lookup, field access, filename parsing, co-sorting, discovery).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading, extracting, grouping or ordering benchmark data.
///
/// Implements `Clone` so per-file failures can be carried out of parallel
/// workers and reported afterwards in discovery order.
///
/// # Examples
///
/// ```
/// use batchbench_core::BenchError;
///
/// let err = BenchError::missing_field("num_batch_entries", "batch_solver/gmres");
/// assert_eq!(
///     err.to_string(),
///     "Missing field 'num_batch_entries' in batch_solver/gmres"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BenchError {
    /// No child key contains the requested substring pattern.
    #[error("No key matching pattern '{pattern}' in {context}")]
    PatternNotFound {
        /// The substring that was searched for.
        pattern: String,
        /// Path of the mapping that was searched.
        context: String,
    },

    /// An expected field is absent.
    #[error("Missing field '{field}' in {context}")]
    MissingField {
        /// Name of the absent field.
        field: String,
        /// Path of the mapping that should contain it.
        context: String,
    },

    /// A field is present but does not hold the expected kind of value.
    #[error("Field '{field}' in {context} is not {expected}")]
    FieldType {
        /// Name of the field.
        field: String,
        /// Path of the mapping holding the field.
        context: String,
        /// Description of the expected value.
        expected: String,
    },

    /// A filename does not follow the configured case/multiplier convention.
    #[error("Invalid benchmark filename '{filename}': {reason}")]
    FilenameFormat {
        /// The offending filename.
        filename: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Primary sequence and dependent rows disagree in length or width.
    #[error("Shape mismatch: expected {expected} {what}, found {found}")]
    ShapeMismatch {
        /// What was being counted (rows, columns).
        what: String,
        /// Required count.
        expected: usize,
        /// Actual count.
        found: usize,
    },

    /// The batch directory contains no eligible input documents.
    #[error("No benchmark documents found in '{}'", dir.display())]
    NoDocumentsFound {
        /// The directory that was scanned.
        dir: PathBuf,
    },

    /// The run type or output layout is not supported, or a document does not
    /// match the variant key set discovered for its batch.
    #[error("Unsupported run type: {0}")]
    UnsupportedRunType(String),

    /// The document is not JSON or does not have the expected top-level shape.
    #[error("Malformed benchmark document: {0}")]
    MalformedDocument(String),

    /// Document exceeds the configured size limit.
    #[error("File '{}' is too large ({actual} bytes). Maximum allowed: {max} bytes", path.display())]
    FileTooLarge {
        /// The file path that exceeded the limit.
        path: PathBuf,
        /// The actual file size in bytes.
        actual: u64,
        /// The maximum allowed size in bytes.
        max: u64,
    },

    /// Reading a document failed.
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The file path that caused the error.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },
}

/// Convenience alias for results carrying a [`BenchError`].
pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a missing-field error.
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a field-type error.
    pub fn field_type(
        field: impl Into<String>,
        context: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::FieldType {
            field: field.into(),
            context: context.into(),
            expected: expected.into(),
        }
    }

    /// Create a filename-format error.
    pub fn filename_format(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FilenameFormat {
            filename: filename.into(),
            reason: reason.into(),
        }
    }

    /// Create a shape-mismatch error.
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Prefix the message with the file the error was raised for.
    ///
    /// Only message-carrying variants are rewritten; structured variants already
    /// name their subject and are returned unchanged.
    pub fn in_file(self, path: &std::path::Path) -> Self {
        match self {
            BenchError::MalformedDocument(msg) => {
                BenchError::MalformedDocument(format!("{}: {}", path.display(), msg))
            }
            BenchError::UnsupportedRunType(msg) => {
                BenchError::UnsupportedRunType(format!("{}: {}", path.display(), msg))
            }
            BenchError::MissingField { field, context } => BenchError::MissingField {
                field,
                context: format!("{} ({})", context, path.display()),
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(source: serde_json::Error) -> Self {
        BenchError::MalformedDocument(source.to_string())
    }
}
