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

//! BatchBench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Analysis
//!
//! - **timings**: kernel time against batch size, per case
//! - **iters**: solver iterations per batch entry, per case
//! - **residuals**: log10 residual norms per batch entry, with an optional
//!   convergence check
//! - **speedup**: speedup of every solver over a reference solver
//!
//! ## Export
//!
//! - **table**: whitespace-separated timing table per case
//! - **plot-tables**: one figure comparing several timing tables
//!
//! ## Utilities
//!
//! - **abridge**: strip per-entry detail from solver documents
//!
//! # Examples
//!
//! ```no_run
//! use batchbench_cli::cli::Commands;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(subcommand)]
//!     command: Commands,
//! }
//!
//! let cli = Cli::parse_from(["batchbench", "table", "--dir", "results", "--processor", "GPU"]);
//! cli.command.execute(false).unwrap();
//! ```
//!
//! # Limits
//!
//! Documents larger than 1 GiB are rejected before they are read; set
//! `BATCHBENCH_MAX_FILE_SIZE` (in bytes) to change the limit.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
