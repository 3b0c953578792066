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

//! Extraction, grouping and ordering of batched solver benchmark results.
//!
//! The solver harness writes one JSON document per run. Metric names inside a
//! document are not known in advance (kernel timings are named after the
//! kernel that ran), the set of solver variants is only known from the data,
//! and batch sizes arrive in directory order. This crate turns a directory of
//! such documents into per-case series ordered by batch size, ready for a
//! table or plot sink.
//!
//! # Pipeline
//!
//! 1. [`pipeline::list_documents`] lists the `*.json` files of a directory.
//! 2. [`VariantKeySet::discover`] reads the variant keys of the first file;
//!    every later file is checked against them.
//! 3. [`RecordExtractor`] produces one [`BenchmarkRecord`] per variant, locating
//!    the apply-kernel time by substring [`pattern`] matching.
//! 4. [`CaseGroup`] accumulates records per case and bucket, with the case
//!    identity parsed from the filename by a [`FilenameConvention`].
//! 5. [`cosort::co_sort`] orders every bucket by batch size.
//! 6. The [`export`] adapter turns [`SortedSeries`] into table rows or plot
//!    figures.
//!
//! # Examples
//!
//! ```no_run
//! use batchbench_core::{ingest_directory, PipelineConfig};
//! use std::path::Path;
//!
//! let cases = ingest_directory(Path::new("results"), PipelineConfig::default()).unwrap();
//! for case in &cases {
//!     for series in &case.series {
//!         println!("{} {}: {:?}", case.case_name, series.variant(), series.points());
//!     }
//! }
//! ```
//!
//! # Errors
//!
//! Every failure is a [`BenchError`] and is fatal for the run that raised it.

pub mod cosort;
mod discovery;
mod document;
mod error;
pub mod export;
mod filename;
mod group;
pub mod pattern;
pub mod pipeline;
pub mod profile;
pub mod record;
mod series;
pub mod speedup;

pub use discovery::VariantKeySet;
pub use document::{BenchmarkDocument, JsonMap, RunType};
pub use error::{BenchError, Result};
pub use export::{ExportLabels, PlotFigure, PlotOptions, PlotSink, PlotStyle, TableRecord};
pub use filename::{CaseFile, FilenameConvention};
pub use group::{BucketKey, CaseGroup};
pub use pipeline::{ingest_directory, FileRecords, Ingestor, PipelineConfig};
pub use profile::{EntryProfile, NormType};
pub use record::{BenchmarkRecord, RecordExtractor};
pub use series::{SortedCase, SortedSeries};
pub use speedup::SpeedupTable;
