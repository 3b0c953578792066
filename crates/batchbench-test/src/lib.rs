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

//! Shared test fixtures for the BatchBench crates.
//!
//! This crate provides canonical benchmark documents, builders, malformed
//! samples and temporary batch directories, so the core, export and CLI
//! crates test against the same data.
//!
//! # Quick Start
//!
//! ```rust
//! use batchbench_test::{fixtures, BatchDir};
//!
//! // Pre-built documents
//! let doc = fixtures::gmres_example();
//! let doc = fixtures::solver_document(32, "csr");
//!
//! // A batch directory with a few runs of one case
//! let dir = BatchDir::new();
//! for size in [8, 32, 16] {
//!     dir.write(&format!("case7-{}.json", size), &fixtures::solver_document(size, "csr"));
//! }
//! assert_eq!(dir.file_names().len(), 3);
//! ```

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> Value)>;

/// Canonical benchmark fixtures.
pub mod fixtures;

pub use fixtures::*;

/// A temporary directory of benchmark documents, removed on drop.
#[derive(Debug)]
pub struct BatchDir {
    dir: TempDir,
}

impl Default for BatchDir {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchDir {
    /// Creates an empty directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temporary batch directory"),
        }
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a document as pretty JSON and returns its path.
    pub fn write(&self, name: &str, doc: &Value) -> PathBuf {
        let text = serde_json::to_string_pretty(doc).expect("fixture documents serialize");
        self.write_raw(name, &text)
    }

    /// Writes raw text and returns its path.
    pub fn write_raw(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, text).expect("failed to write fixture file");
        path
    }

    /// Names of the files in the directory, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .expect("failed to read batch directory")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fixtures_are_arrays_of_one_object() {
        for (name, fixture) in fixtures::all() {
            let doc = fixture();
            let items = doc.as_array().unwrap_or_else(|| panic!("{} is not an array", name));
            assert!(items[0].is_object(), "{} has no object", name);
        }
    }

    #[test]
    fn test_solver_document_order() {
        let doc = fixtures::solver_document(8, "csr");
        let keys: Vec<&String> = doc[0]["batch_solver"].as_object().unwrap().keys().collect();
        assert_eq!(keys, fixtures::SOLVERS);
    }

    #[test]
    fn test_batch_dir() {
        let dir = BatchDir::new();
        dir.write("b-2.json", &fixtures::gmres_example());
        dir.write_raw("a-1.json", "[]");
        assert_eq!(dir.file_names(), ["a-1.json", "b-2.json"]);
    }
}
