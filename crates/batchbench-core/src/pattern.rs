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

//! Substring-pattern lookup of dynamically named keys.
//!
//! Timing breakdowns name their phases after the kernel that ran
//! (`batch_apply_kernel`, `apply_2`, ...), so the metric of interest is found by
//! substring rather than by exact key. The first key in mapping order that
//! contains the pattern wins; metric names are expected to be distinct enough
//! that only one sensible match exists.

use crate::document::JsonMap;
use crate::error::{BenchError, Result};
use serde_json::Value;

/// Pattern used to locate the apply-kernel timing inside `apply.components`.
pub const APPLY_PATTERN: &str = "apply";

/// Find the first child whose key contains `pattern`.
///
/// # Examples
///
/// ```
/// use batchbench_core::pattern::find_matching;
/// use serde_json::json;
///
/// let components = json!({"setup": 0.1, "batch_apply_kernel": 0.9});
/// let (key, value) = find_matching(components.as_object().unwrap(), "apply").unwrap();
/// assert_eq!(key, "batch_apply_kernel");
/// assert_eq!(value.as_f64(), Some(0.9));
/// ```
pub fn find_matching<'a>(map: &'a JsonMap, pattern: &str) -> Option<(&'a str, &'a Value)> {
    map.iter()
        .find(|(key, _)| key.contains(pattern))
        .map(|(key, value)| (key.as_str(), value))
}

/// Return the value of the first child whose key contains `pattern`.
///
/// # Errors
///
/// Returns [`BenchError::PatternNotFound`] when no key matches. `context`
/// names the searched mapping in the error.
pub fn extract_matching<'a>(map: &'a JsonMap, pattern: &str, context: &str) -> Result<&'a Value> {
    find_matching(map, pattern)
        .map(|(_, value)| value)
        .ok_or_else(|| BenchError::PatternNotFound {
            pattern: pattern.to_string(),
            context: context.to_string(),
        })
}

/// Like [`extract_matching`], requiring the matched value to be a number.
pub fn extract_matching_f64(map: &JsonMap, pattern: &str, context: &str) -> Result<f64> {
    let (key, value) = find_matching(map, pattern).ok_or_else(|| BenchError::PatternNotFound {
        pattern: pattern.to_string(),
        context: context.to_string(),
    })?;

    value
        .as_f64()
        .ok_or_else(|| BenchError::field_type(key, context, "a number"))
}
