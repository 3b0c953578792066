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

//! Figure sink writing JSON figure documents.

use crate::abridge::to_pretty_string;
use crate::error::{JsonExportError, Result};
use batchbench_core::{PlotFigure, PlotSink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Extension of figure files.
///
/// Figures are JSON, but must not end in `.json`: a figure written into a
/// batch directory would otherwise be read back as a benchmark document.
pub const FIGURE_EXTENSION: &str = "figure";

/// Writes each figure as a JSON document to `<out_dir>/<file_stem>.figure`.
///
/// The document carries the axis labels, scale and every labelled, styled
/// point series, ready for any plotting front end.
#[derive(Debug, Clone)]
pub struct JsonPlotSink {
    out_dir: PathBuf,
    pretty: bool,
    written: Vec<PathBuf>,
}

impl JsonPlotSink {
    /// Sink writing pretty-printed figures into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            pretty: true,
            written: Vec::new(),
        }
    }

    /// Write compact single-line JSON instead.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn figure_path(&self, figure: &PlotFigure) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", figure.file_stem, FIGURE_EXTENSION))
    }
}

impl PlotSink for JsonPlotSink {
    type Error = JsonExportError;

    fn write_figure(&mut self, figure: &PlotFigure) -> Result<PathBuf> {
        let path = self.figure_path(figure);
        let text = if self.pretty {
            to_pretty_string(figure)?
        } else {
            serde_json::to_string(figure)?
        };
        fs::write(&path, text).map_err(|e| JsonExportError::write(&path, e))?;
        info!("Wrote figure {}", path.display());
        self.written.push(path.clone());
        Ok(path)
    }
}
