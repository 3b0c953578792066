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

//! Whitespace-separated timing tables for batched benchmark results.
//!
//! A timing table has one row per `(solver, batch size)` measurement of a
//! case and the columns
//!
//! ```text
//! processor case_name solver_type matrix_format tolerance_type batch_size solve_time
//! ```
//!
//! Tables are written one file per case (`<case_name>.txt`) and can be read
//! back for cross-platform comparison plots.
//!
//! # Examples
//!
//! ## Writing a table
//!
//! ```no_run
//! use batchbench_core::{ingest_directory, ExportLabels, PipelineConfig};
//! use batchbench_core::export::table_records;
//! use batchbench_csv::write_table_file;
//! use std::path::Path;
//!
//! let cases = ingest_directory(Path::new("results"), PipelineConfig::default()).unwrap();
//! let labels = ExportLabels::default();
//! for case in &cases {
//!     let rows: Vec<_> = case
//!         .series
//!         .iter()
//!         .flat_map(|s| table_records(&case.case_name, s, &labels))
//!         .collect();
//!     write_table_file(Path::new("tables"), &case.case_name, &rows).unwrap();
//! }
//! ```
//!
//! ## Reading a table
//!
//! ```
//! use batchbench_csv::from_table;
//!
//! let text = "\
//! processor case_name solver_type matrix_format tolerance_type batch_size solve_time
//! GPU pele cg ell absolute 128 0.004
//! GPU pele cg ell absolute 256 0.007
//! ";
//! let rows = from_table(text).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].batch_size, 256);
//! ```

mod error;
mod from_table;
mod to_table;

pub use error::{Result, TableError};
pub use from_table::{
    from_table, from_table_reader, read_table_file, FromTableConfig, DEFAULT_MAX_ROWS,
};
pub use to_table::{
    table_path, to_table, to_table_with_config, to_table_writer, to_table_writer_with_config,
    write_table_file, ToTableConfig, TABLE_COLUMNS, TABLE_EXTENSION,
};
