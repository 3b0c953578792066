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

//! Abridge every document of a batch directory.

use super::{max_file_size, report_written};
use crate::batch::{AbridgeOperation, BatchConfig, BatchProcessor};
use crate::error::CliError;
use batchbench_core::pipeline::list_documents;
use batchbench_json::AbridgeOptions;
use std::path::Path;

/// Write `<file>.processed` next to every `*.json` document of `dir`.
pub fn abridge(dir: &Path, config: BatchConfig, options: AbridgeOptions) -> Result<(), CliError> {
    let files = list_documents(dir)?;
    let operation = AbridgeOperation {
        options,
        max_file_size: max_file_size(),
    };
    let show_progress = config.verbose;

    let written = BatchProcessor::new(config)
        .process(&files, operation, show_progress)
        .into_outputs()?;

    for path in &written {
        report_written(path);
    }
    Ok(())
}
