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

//! Error type for JSON output.

use batchbench_core::BenchError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while abridging documents or writing figure files.
#[derive(Debug, Error)]
pub enum JsonExportError {
    /// The input document could not be read or lacks a required entry.
    #[error(transparent)]
    Document(#[from] BenchError),

    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing an output file failed.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl JsonExportError {
    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for JSON output operations.
pub type Result<T> = std::result::Result<T, JsonExportError>;
