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

//! Case name and batch multiplier encoded in result filenames.
//!
//! Two naming conventions are produced by the benchmark scripts:
//!
//! - dashed: `<case_name>-<batch_multiplier>.json`, e.g. `case7-192.json`
//! - prefixed: `<case_name>_<prefix-char><batch_multiplier>.json`, e.g.
//!   `myproblem_s1.json`
//!
//! The case name is everything before the final delimiter, so case names may
//! themselves contain the delimiter (`pele_chem_s2.json` is case `pele_chem`).

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filename convention used by a batch directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenameConvention {
    /// `<case_name>-<batch_multiplier>.json`
    #[default]
    Dashed,
    /// `<case_name>_<prefix-char><batch_multiplier>.json`
    Prefixed,
}

/// Case identity parsed from a filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseFile {
    /// Logical benchmark problem the file belongs to.
    pub case_name: String,
    /// Number of problem instances batched together for this run.
    pub batch_multiplier: u64,
}

impl FilenameConvention {
    /// The delimiter separating case name and multiplier.
    pub fn delimiter(&self) -> char {
        match self {
            FilenameConvention::Dashed => '-',
            FilenameConvention::Prefixed => '_',
        }
    }

    /// Parse a filename (not a path) into its case name and batch multiplier.
    ///
    /// # Examples
    ///
    /// ```
    /// use batchbench_core::FilenameConvention;
    ///
    /// let file = FilenameConvention::Dashed.parse("case7-192.json").unwrap();
    /// assert_eq!(file.case_name, "case7");
    /// assert_eq!(file.batch_multiplier, 192);
    ///
    /// let file = FilenameConvention::Prefixed.parse("myproblem_s1.json").unwrap();
    /// assert_eq!(file.case_name, "myproblem");
    /// assert_eq!(file.batch_multiplier, 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::FilenameFormat`] when the delimiter is missing, the
    /// case name is empty, or the suffix is not a positive integer.
    pub fn parse(&self, filename: &str) -> Result<CaseFile> {
        let stem = strip_extension(filename);
        let delimiter = self.delimiter();

        let (case_name, suffix) = stem.rsplit_once(delimiter).ok_or_else(|| {
            BenchError::filename_format(
                filename,
                format!("missing '{}' before the batch multiplier", delimiter),
            )
        })?;

        if case_name.is_empty() {
            return Err(BenchError::filename_format(filename, "empty case name"));
        }

        let digits = match self {
            FilenameConvention::Dashed => suffix,
            FilenameConvention::Prefixed => strip_prefix_char(suffix),
        };

        let batch_multiplier: u64 = digits.parse().map_err(|_| {
            BenchError::filename_format(
                filename,
                format!("batch multiplier '{}' is not an integer", suffix),
            )
        })?;

        if batch_multiplier == 0 {
            return Err(BenchError::filename_format(
                filename,
                "batch multiplier must be at least 1",
            ));
        }

        Ok(CaseFile {
            case_name: case_name.to_string(),
            batch_multiplier,
        })
    }
}

impl fmt::Display for FilenameConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameConvention::Dashed => f.write_str("dashed"),
            FilenameConvention::Prefixed => f.write_str("prefixed"),
        }
    }
}

impl FromStr for FilenameConvention {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dashed" => Ok(FilenameConvention::Dashed),
            "prefixed" => Ok(FilenameConvention::Prefixed),
            other => Err(format!(
                "unknown filename convention '{}' (expected 'dashed' or 'prefixed')",
                other
            )),
        }
    }
}

fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

/// Drop one leading non-digit character (the `s` of `_s192`).
fn strip_prefix_char(suffix: &str) -> &str {
    let mut chars = suffix.chars();
    match chars.next() {
        Some(c) if !c.is_ascii_digit() => chars.as_str(),
        _ => suffix,
    }
}
