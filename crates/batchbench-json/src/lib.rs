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

//! JSON output for BatchBench.
//!
//! - [`abridge_document`] / [`abridge_file`]: reduce detailed solver documents
//!   to their timing data (`<file>.processed`, 4-space indent).
//! - [`JsonPlotSink`]: a [`PlotSink`](batchbench_core::PlotSink) that writes
//!   every figure as `<out_dir>/<file_stem>.figure`.
//!
//! # Example
//!
//! ```no_run
//! use batchbench_core::export::timing_figure;
//! use batchbench_core::{ingest_directory, PipelineConfig, PlotOptions, PlotSink};
//! use batchbench_json::JsonPlotSink;
//! use std::path::Path;
//!
//! let cases = ingest_directory(Path::new("results"), PipelineConfig::default()).unwrap();
//! let mut sink = JsonPlotSink::new("figures");
//! for case in &cases {
//!     sink.write_figure(&timing_figure(case, &PlotOptions::default())).unwrap();
//! }
//! ```

mod abridge;
mod error;
mod sink;

pub use abridge::{
    abridge_document, abridge_file, abridged_path, to_pretty_string, AbridgeOptions,
    ABRIDGED_SUFFIX,
};
pub use error::{JsonExportError, Result};
pub use sink::{JsonPlotSink, FIGURE_EXTENSION};
