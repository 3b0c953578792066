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

//! Directory ingestion: discovery, per-file extraction and grouping.
//!
//! A run lists the `*.json` files of one directory (non-recursive, sorted by
//! file name), discovers the variant key set from the first of them, and then
//! extracts every file in that order. Per-file extraction is pure, so callers
//! may run it on several threads as long as the results are grouped in
//! discovery order.

use crate::discovery::VariantKeySet;
use crate::document::{BenchmarkDocument, RunType};
use crate::error::{BenchError, Result};
use crate::filename::{CaseFile, FilenameConvention};
use crate::group::CaseGroup;
use crate::pattern::APPLY_PATTERN;
use crate::profile::{EntryProfile, NormType, ProfileExtractor};
use crate::record::{BenchmarkRecord, RecordExtractor};
use crate::series::SortedCase;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Default maximum document size (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Extension of benchmark documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Configuration of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Run-type section to read; `None` reads the flat (abridged) layout.
    pub selector: Option<RunType>,
    /// How case names and multipliers are encoded in filenames.
    pub convention: FilenameConvention,
    /// Substring locating the kernel time inside `apply.components`.
    pub pattern: String,
    /// Split series by matrix format as well as by variant.
    pub group_by_matrix_format: bool,
    /// Largest document that will be read, in bytes.
    pub max_file_size: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            selector: Some(RunType::BatchSolver),
            convention: FilenameConvention::Dashed,
            pattern: APPLY_PATTERN.to_string(),
            group_by_matrix_format: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// List the benchmark documents of a directory, sorted by file name.
///
/// # Errors
///
/// - [`BenchError::Io`] if the directory cannot be read
/// - [`BenchError::NoDocumentsFound`] if it holds no `*.json` regular file
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| BenchError::Io {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(BenchError::NoDocumentsFound {
            dir: dir.to_path_buf(),
        });
    }

    debug!("Found {} benchmark documents in {}", files.len(), dir.display());
    Ok(files)
}

/// Records extracted from one file, one per variant in key-set order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecords {
    /// Document the records were read from.
    pub path: PathBuf,
    /// Case identity parsed from its filename.
    pub case: CaseFile,
    /// One record per variant, in key-set order.
    pub records: Vec<BenchmarkRecord>,
}

/// Per-batch state shared by every file of a run.
///
/// # Examples
///
/// ```no_run
/// use batchbench_core::{Ingestor, PipelineConfig};
/// use std::path::Path;
///
/// let dir = Path::new("results");
/// let (ingestor, files) = Ingestor::open(PipelineConfig::default(), dir).unwrap();
///
/// let extracted: Vec<_> = files
///     .iter()
///     .map(|f| ingestor.extract_file(f))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// let cases = ingestor.group(extracted).into_sorted().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Ingestor {
    config: PipelineConfig,
    keys: VariantKeySet,
    extractor: RecordExtractor,
}

impl Ingestor {
    /// List the documents of `dir` and discover the variant key set from the
    /// first of them.
    ///
    /// Returns the ingestor together with every listed document, in
    /// discovery order.
    ///
    /// # Errors
    ///
    /// [`BenchError::NoDocumentsFound`] naming `dir` when it holds no
    /// document, and any error raised while loading the first one.
    pub fn open(config: PipelineConfig, dir: &Path) -> Result<(Self, Vec<PathBuf>)> {
        let files = list_documents(dir)?;
        let first = files.first().ok_or_else(|| BenchError::NoDocumentsFound {
            dir: dir.to_path_buf(),
        })?;
        let ingestor = Self::discover(config, first)?;
        Ok((ingestor, files))
    }

    /// Discover the variant key set from one representative document.
    ///
    /// # Errors
    ///
    /// Any error raised while loading the document or reading its variants.
    pub fn discover(config: PipelineConfig, first: &Path) -> Result<Self> {
        let doc = BenchmarkDocument::load(first, config.max_file_size)?;
        let keys = VariantKeySet::discover(&doc, config.selector).map_err(|e| e.in_file(first))?;
        info!("Found variants {}", keys);

        let formats = keys.matrix_formats(&doc).map_err(|e| e.in_file(first))?;
        let formats: Vec<&str> = formats
            .iter()
            .map(|f| f.as_deref().unwrap_or("-"))
            .collect();
        debug!("Matrix formats: [{}]", formats.join(", "));

        Ok(Self::with_keys(config, keys))
    }

    /// Build an ingestor for an already known key set.
    pub fn with_keys(config: PipelineConfig, keys: VariantKeySet) -> Self {
        let extractor = RecordExtractor::new(config.selector)
            .with_pattern(config.pattern.clone())
            .with_required_matrix_format(config.group_by_matrix_format);
        Self {
            config,
            keys,
            extractor,
        }
    }

    /// Configuration of this run.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The discovered variant key set.
    pub fn keys(&self) -> &VariantKeySet {
        &self.keys
    }

    /// Parse the case identity of a document path.
    ///
    /// Block solver output (any filename containing `block`) is rejected with
    /// [`BenchError::UnsupportedRunType`].
    pub fn case_file(&self, path: &Path) -> Result<CaseFile> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                BenchError::filename_format(path.display().to_string(), "not valid UTF-8")
            })?;

        if name.contains("block") {
            return Err(BenchError::UnsupportedRunType(format!(
                "block solver output '{}' is not supported",
                name
            )));
        }

        self.config.convention.parse(name)
    }

    /// Load a document and check it against the key set.
    pub fn load(&self, path: &Path) -> Result<(CaseFile, BenchmarkDocument)> {
        let case = self.case_file(path)?;
        let doc = BenchmarkDocument::load(path, self.config.max_file_size)?;
        self.keys.check(&doc).map_err(|e| e.in_file(path))?;
        debug!(
            "Case {} with batch multiplier {} ({})",
            case.case_name,
            case.batch_multiplier,
            path.display()
        );
        Ok((case, doc))
    }

    /// Extract one record per variant from a file.
    pub fn extract_file(&self, path: &Path) -> Result<FileRecords> {
        let (case, doc) = self.load(path)?;
        let records = self
            .keys
            .iter()
            .map(|variant| {
                self.extractor
                    .extract(&doc, variant, &case)
                    .map_err(|e| e.in_file(path))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FileRecords {
            path: path.to_path_buf(),
            case,
            records,
        })
    }

    /// Iteration profiles of every variant of a file.
    pub fn iteration_profiles(&self, path: &Path) -> Result<(CaseFile, Vec<EntryProfile>)> {
        let (case, doc) = self.load(path)?;
        let extractor = ProfileExtractor::new(self.config.selector);
        let profiles = self
            .keys
            .iter()
            .map(|v| extractor.iterations(&doc, v, &case).map_err(|e| e.in_file(path)))
            .collect::<Result<Vec<_>>>()?;
        Ok((case, profiles))
    }

    /// Residual-norm profiles of every variant of a file.
    pub fn residual_profiles(
        &self,
        path: &Path,
        norm: NormType,
    ) -> Result<(CaseFile, Vec<EntryProfile>)> {
        let (case, doc) = self.load(path)?;
        let extractor = ProfileExtractor::new(self.config.selector);
        let profiles = self
            .keys
            .iter()
            .map(|v| {
                extractor
                    .residuals(&doc, v, &case, norm)
                    .map_err(|e| e.in_file(path))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((case, profiles))
    }

    /// Accumulate extracted files, in the order given, into a [`CaseGroup`].
    pub fn group(&self, files: impl IntoIterator<Item = FileRecords>) -> CaseGroup {
        let mut group = CaseGroup::new(self.config.group_by_matrix_format);
        for file in files {
            group.append(file.records);
        }
        group
    }
}

/// Run the whole pipeline over a directory, sequentially.
///
/// Stops at the first failing file in discovery order.
pub fn ingest_directory(dir: &Path, config: PipelineConfig) -> Result<Vec<SortedCase>> {
    let (ingestor, files) = Ingestor::open(config, dir)?;

    let mut group = CaseGroup::new(ingestor.config().group_by_matrix_format);
    for path in &files {
        let extracted = ingestor.extract_file(path)?;
        group.append(extracted.records);
    }

    let cases = group.into_sorted()?;
    info!("Grouped {} files into {} cases", files.len(), cases.len());
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOC: &str = r#"[{"batch_solver": {"gmres": {"num_batch_entries": 4,
        "apply": {"time": 1.0, "components": {"apply_kernel": 0.5}}}}}]"#;

    #[test]
    fn test_list_documents_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-2.json"), DOC).unwrap();
        fs::write(dir.path().join("a-1.json"), DOC).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = list_documents(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a-1.json", "b-2.json"]);
    }

    #[test]
    fn test_list_documents_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.md"), "x").unwrap();
        let err = list_documents(dir.path()).unwrap_err();
        assert!(matches!(err, BenchError::NoDocumentsFound { .. }));
    }

    #[test]
    fn test_open_reports_the_empty_directory() {
        let dir = TempDir::new().unwrap();
        let err = Ingestor::open(PipelineConfig::default(), dir.path()).unwrap_err();
        assert_eq!(
            err,
            BenchError::NoDocumentsFound {
                dir: dir.path().to_path_buf()
            }
        );
    }

    #[test]
    fn test_open_discovers_from_first_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-2.json"), DOC).unwrap();
        fs::write(dir.path().join("a-1.json"), DOC).unwrap();

        let (ingestor, files) = Ingestor::open(PipelineConfig::default(), dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(ingestor.keys().keys(), ["gmres".to_string()]);
    }

    #[test]
    fn test_block_files_rejected() {
        let ingestor = Ingestor::with_keys(
            PipelineConfig::default(),
            VariantKeySet::from_keys(Some(RunType::BatchSolver), vec!["gmres".into()]),
        );
        let err = ingestor
            .case_file(Path::new("case-block-4.json"))
            .unwrap_err();
        assert!(matches!(err, BenchError::UnsupportedRunType(_)));
    }

    #[test]
    fn test_file_too_large() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("case-1.json");
        fs::write(&path, DOC).unwrap();

        let config = PipelineConfig {
            max_file_size: 8,
            ..PipelineConfig::default()
        };
        let err = Ingestor::discover(config, &path).unwrap_err();
        assert!(matches!(err, BenchError::FileTooLarge { max: 8, .. }));
    }

    #[test]
    fn test_ingest_single_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("case-3.json"), DOC).unwrap();
        let cases = ingest_directory(dir.path(), PipelineConfig::default()).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_name, "case");
        assert_eq!(cases[0].series[0].records()[0].batch_multiplier, 3);
        assert_eq!(cases[0].series[0].metric_values(), vec![0.5]);
    }
}
