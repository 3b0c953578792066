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

//! Per-file processing of a batch directory with optional parallel execution.
//!
//! Every analysis command reads all documents of a directory and turns each
//! into some per-file output (records, profiles, an abridged copy). The
//! [`BatchProcessor`] runs a [`BatchOperation`] over the file list either
//! serially or on the rayon pool. Results always come back in discovery
//! order, so grouping them afterwards gives the same buckets whichever mode
//! ran, and the first failure in that order is the one reported.
//!
//! # Examples
//!
//! ```rust,no_run
//! use batchbench_cli::batch::{BatchConfig, BatchProcessor, ExtractOperation};
//! use batchbench_core::{Ingestor, PipelineConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (ingestor, files) = Ingestor::open(PipelineConfig::default(), Path::new("results"))?;
//!
//! let processor = BatchProcessor::new(BatchConfig {
//!     parallel: true,
//!     ..BatchConfig::default()
//! });
//! let results = processor.process(&files, ExtractOperation::new(&ingestor), false);
//! println!("{} files, {} failed", results.len(), results.failed());
//!
//! let cases = ingestor.group(results.into_outputs()?).into_sorted()?;
//! # Ok(())
//! # }
//! ```

use crate::error::CliError;
use batchbench_core::{CaseFile, EntryProfile, FileRecords, Ingestor, NormType};
use batchbench_json::AbridgeOptions;
use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::warn;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Run files on the rayon pool.
    pub parallel: bool,

    /// Minimum number of files before parallel mode is used.
    ///
    /// Smaller batches run serially even with `parallel` set.
    pub parallel_threshold: usize,

    /// Worker threads of the pool (`None` = one per core).
    pub max_threads: Option<usize>,

    /// Print every file as it finishes.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: 2,
            max_threads: None,
            verbose: false,
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone)]
pub struct FileOutcome<T> {
    /// Input document.
    pub path: PathBuf,
    /// Output of the operation on it.
    pub result: Result<T, CliError>,
}

/// Outcomes of a batch, one per input file in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// One outcome per input, in input order.
    pub outcomes: Vec<FileOutcome<T>>,
}

impl<T> BatchResults<T> {
    /// Number of files processed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of files whose operation failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// All outputs in input order, or the first failure in input order.
    pub fn into_outputs(self) -> Result<Vec<T>, CliError> {
        self.outcomes.into_iter().map(|o| o.result).collect()
    }
}

/// An operation applied independently to every file of a batch.
///
/// The same file must give the same output on whichever worker runs it.
pub trait BatchOperation: Send + Sync {
    type Output: Send;

    /// Process one document.
    fn run(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Label used in progress output.
    fn name(&self) -> &str;
}

/// Per-file progress lines on stderr, shared by the workers of one batch.
#[derive(Debug)]
struct Progress {
    total: usize,
    done: AtomicUsize,
    failed: AtomicUsize,
    started: Instant,
}

impl Progress {
    fn start(total: usize) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    fn tick<T>(&self, path: &Path, result: &Result<T, CliError>) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let mark = match result {
            Ok(_) => "ok".green(),
            Err(_) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                "failed".red().bold()
            }
        };
        eprintln!("[{}/{}] {} {}", done, self.total, mark, path.display());
        if let Err(e) = result {
            eprintln!("        {}", e);
        }
    }

    fn finish(&self, name: &str) {
        let failed = self.failed.load(Ordering::Relaxed);
        let counts = format!(
            "{} documents, {} failed",
            self.done.load(Ordering::Relaxed),
            failed
        );
        eprintln!(
            "{} {} in {:.2}s",
            format!("{}:", name).bright_blue().bold(),
            if failed == 0 { counts.green() } else { counts.red() },
            self.started.elapsed().as_secs_f64()
        );
    }
}

/// Runs a [`BatchOperation`] over a list of files.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process every file and return the outcomes in input order.
    ///
    /// A failure does not stop the other files; callers decide whether it
    /// is fatal (see [`BatchResults::into_outputs`]).
    pub fn process<O>(
        &self,
        files: &[PathBuf],
        operation: O,
        show_progress: bool,
    ) -> BatchResults<O::Output>
    where
        O: BatchOperation,
    {
        let parallel = self.config.parallel && files.len() >= self.config.parallel_threshold;
        let progress = (show_progress && !files.is_empty()).then(|| Progress::start(files.len()));

        let run_one = |path: &PathBuf| {
            let result = operation.run(path);
            if let Some(progress) = &progress {
                progress.tick(path, &result);
            }
            FileOutcome {
                path: path.clone(),
                result,
            }
        };

        let outcomes: Vec<_> = if !parallel {
            files.iter().map(run_one).collect()
        } else if let Some(pool) = self.thread_pool() {
            pool.install(|| files.par_iter().map(run_one).collect())
        } else {
            files.par_iter().map(run_one).collect()
        };

        if let Some(progress) = progress {
            progress.finish(operation.name());
        }

        BatchResults { outcomes }
    }

    /// Dedicated pool when a thread count is configured.
    fn thread_pool(&self) -> Option<rayon::ThreadPool> {
        let threads = self.config.max_threads?;
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("Cannot start {} worker threads ({}); using the global pool", threads, e);
                None
            }
        }
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Extract one record per variant from each file.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOperation<'a> {
    ingestor: &'a Ingestor,
}

impl<'a> ExtractOperation<'a> {
    pub fn new(ingestor: &'a Ingestor) -> Self {
        Self { ingestor }
    }
}

impl BatchOperation for ExtractOperation<'_> {
    type Output = FileRecords;

    fn run(&self, path: &Path) -> Result<Self::Output, CliError> {
        Ok(self.ingestor.extract_file(path)?)
    }

    fn name(&self) -> &str {
        "extract"
    }
}

/// Which per-entry profile to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Iterations,
    Residuals(NormType),
}

/// Read per-entry profiles of every variant from each file.
#[derive(Debug, Clone, Copy)]
pub struct ProfileOperation<'a> {
    ingestor: &'a Ingestor,
    kind: ProfileKind,
}

impl<'a> ProfileOperation<'a> {
    pub fn new(ingestor: &'a Ingestor, kind: ProfileKind) -> Self {
        Self { ingestor, kind }
    }
}

impl BatchOperation for ProfileOperation<'_> {
    type Output = (CaseFile, Vec<EntryProfile>);

    fn run(&self, path: &Path) -> Result<Self::Output, CliError> {
        let profiles = match self.kind {
            ProfileKind::Iterations => self.ingestor.iteration_profiles(path)?,
            ProfileKind::Residuals(norm) => self.ingestor.residual_profiles(path, norm)?,
        };
        Ok(profiles)
    }

    fn name(&self) -> &str {
        match self.kind {
            ProfileKind::Iterations => "iterations",
            ProfileKind::Residuals(_) => "residuals",
        }
    }
}

/// Write the abridged copy of each file.
#[derive(Debug, Clone, Copy)]
pub struct AbridgeOperation {
    pub options: AbridgeOptions,
    pub max_file_size: u64,
}

impl BatchOperation for AbridgeOperation {
    type Output = PathBuf;

    fn run(&self, path: &Path) -> Result<Self::Output, CliError> {
        Ok(batchbench_json::abridge_file(
            path,
            self.max_file_size,
            self.options,
        )?)
    }

    fn name(&self) -> &str {
        "abridge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Output is the length of the path; paths containing "bad" fail.
    struct NameLength;

    impl BatchOperation for NameLength {
        type Output = usize;

        fn run(&self, path: &Path) -> Result<Self::Output, CliError> {
            let name = path.to_string_lossy();
            if name.contains("bad") {
                return Err(CliError::invalid_input(format!("rejected {}", name)));
            }
            Ok(name.len())
        }

        fn name(&self) -> &str {
            "length"
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn processor(parallel: bool) -> BatchProcessor {
        BatchProcessor::new(BatchConfig {
            parallel,
            ..BatchConfig::default()
        })
    }

    #[test]
    fn test_default_config_is_serial() {
        let config = BatchConfig::default();
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 2);
        assert_eq!(config.max_threads, None);
    }

    #[test]
    fn test_no_files() {
        let results = processor(true).process(&[], NameLength, true);
        assert!(results.is_empty());
        assert_eq!(results.into_outputs().unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_outputs_in_input_order() {
        let names: Vec<String> = (0..50).map(|i| "x".repeat(i + 1)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let input = paths(&refs);

        for parallel in [false, true] {
            let outputs = processor(parallel)
                .process(&input, NameLength, false)
                .into_outputs()
                .unwrap();
            assert_eq!(outputs, (1..=50).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_first_failure_in_input_order() {
        let input = paths(&["a", "bad-1", "c", "bad-2"]);
        let results = processor(true).process(&input, NameLength, false);
        assert_eq!(results.len(), 4);
        assert_eq!(results.failed(), 2);

        let err = results.into_outputs().unwrap_err();
        assert!(err.to_string().contains("bad-1"));
    }

    struct WorkerCount;

    impl BatchOperation for WorkerCount {
        type Output = usize;

        fn run(&self, _path: &Path) -> Result<Self::Output, CliError> {
            Ok(rayon::current_num_threads())
        }

        fn name(&self) -> &str {
            "workers"
        }
    }

    #[test]
    fn test_max_threads_sizes_the_pool() {
        let input = paths(&["a", "b", "c", "d"]);
        for threads in [1, 3] {
            let processor = BatchProcessor::new(BatchConfig {
                parallel: true,
                max_threads: Some(threads),
                ..BatchConfig::default()
            });
            let counts = processor
                .process(&input, WorkerCount, false)
                .into_outputs()
                .unwrap();
            assert_eq!(counts, vec![threads; 4]);
        }
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let input = paths(&["bad", "ab"]);
        let results = processor(false).process(&input, NameLength, false);
        assert!(results.outcomes[0].result.is_err());
        assert_eq!(results.outcomes[1].result.as_ref().ok(), Some(&2));
    }
}
