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

//! Variant key discovery.
//!
//! A batch of result files shares one set of solver (or run) variants. The set
//! is read once from a representative document and then checked against every
//! other document as it is ingested, so a file with a different solver line-up
//! fails instead of having its values attributed to the wrong labels.

use crate::document::{BenchmarkDocument, RunType};
use crate::error::{BenchError, Result};
use serde_json::Value;
use std::fmt;

/// The ordered variant keys of a batch, with the selector they live under.
///
/// # Examples
///
/// ```
/// use batchbench_core::{BenchmarkDocument, RunType, VariantKeySet};
///
/// let doc = BenchmarkDocument::parse(
///     r#"[{"batch_solver": {"bicgstab": {}, "gmres": {}}}]"#,
/// ).unwrap();
///
/// let keys = VariantKeySet::discover(&doc, Some(RunType::BatchSolver)).unwrap();
/// assert_eq!(keys.keys(), ["bicgstab", "gmres"]);
/// assert!(keys.check(&doc).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantKeySet {
    selector: Option<RunType>,
    keys: Vec<String>,
}

impl VariantKeySet {
    /// Discover the variant keys of a representative document.
    ///
    /// # Errors
    ///
    /// Fails with [`BenchError::MissingField`] when the selected run-type section
    /// is absent, and with [`BenchError::UnsupportedRunType`] when it holds no
    /// variants at all.
    pub fn discover(doc: &BenchmarkDocument, selector: Option<RunType>) -> Result<Self> {
        let keys: Vec<String> = doc.variants(selector)?.keys().cloned().collect();

        if keys.is_empty() {
            return Err(BenchError::UnsupportedRunType(format!(
                "no variants found under '{}'",
                selector.map(|rt| rt.key()).unwrap_or("document")
            )));
        }

        Ok(Self { selector, keys })
    }

    /// Build a key set directly, e.g. for documents produced in-process.
    pub fn from_keys(selector: Option<RunType>, keys: Vec<String>) -> Self {
        Self { selector, keys }
    }

    /// The run-type section the keys were discovered under.
    pub fn selector(&self) -> Option<RunType> {
        self.selector
    }

    /// Variant keys in document order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the keys in document order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Position of a variant in the set.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Whether the set contains a variant.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Verify that a document exposes exactly these variants, in this order.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::UnsupportedRunType`] describing both key lists when
    /// the document differs from the discovered set.
    pub fn check(&self, doc: &BenchmarkDocument) -> Result<()> {
        let variants = doc.variants(self.selector)?;

        if variants.len() == self.keys.len()
            && variants.keys().zip(&self.keys).all(|(a, b)| a == b)
        {
            return Ok(());
        }

        let found: Vec<&str> = variants.keys().map(String::as_str).collect();
        Err(BenchError::UnsupportedRunType(format!(
            "variant keys [{}] differ from the batch's [{}]",
            found.join(", "),
            self.keys.join(", ")
        )))
    }

    /// The `matrix_format` tag of every variant in a document, in key order.
    ///
    /// Variants without a string `matrix_format` yield `None`.
    pub fn matrix_formats(&self, doc: &BenchmarkDocument) -> Result<Vec<Option<String>>> {
        self.keys
            .iter()
            .map(|key| {
                let variant = doc.variant(self.selector, key)?;
                Ok(match variant.get("matrix_format") {
                    Some(Value::String(format)) => Some(format.clone()),
                    _ => None,
                })
            })
            .collect()
    }
}

impl fmt::Display for VariantKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.keys.join(", "))
    }
}
