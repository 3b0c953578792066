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

//! Conversion of sorted series into table rows and plot figures.
//!
//! The adapter never renders anything itself. Figures are plain data handed
//! to a [`PlotSink`]; tables are [`TableRecord`]s written by a table sink.

use crate::error::{BenchError, Result};
use crate::profile::NormType;
use crate::series::{SortedCase, SortedSeries};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Matrix format written to tables when neither the labels nor the record
/// provide one.
pub const UNKNOWN_MATRIX_FORMAT: &str = "none";

/// Fixed labels attached to every exported row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLabels {
    /// Processor the runs were performed on.
    pub processor: String,
    /// Tolerance (norm) type of the runs.
    pub norm_type: NormType,
    /// Matrix format override; the record's own format is used otherwise.
    pub matrix_format: Option<String>,
}

impl Default for ExportLabels {
    fn default() -> Self {
        Self {
            processor: "CPU".to_string(),
            norm_type: NormType::Relative,
            matrix_format: None,
        }
    }
}

/// One row of an exported timing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Processor label.
    pub processor: String,
    /// Case name.
    pub case_name: String,
    /// Solver variant.
    pub solver_type: String,
    /// Matrix format.
    pub matrix_format: String,
    /// Tolerance type (`absolute` or `relative`).
    pub tolerance_type: String,
    /// Batch size.
    pub batch_size: u64,
    /// Apply-kernel time in seconds.
    pub solve_time: f64,
}

/// Table rows of one sorted series, in batch-size order.
pub fn table_records(
    case_name: &str,
    series: &SortedSeries,
    labels: &ExportLabels,
) -> Vec<TableRecord> {
    series
        .records()
        .iter()
        .map(|record| TableRecord {
            processor: labels.processor.clone(),
            case_name: case_name.to_string(),
            solver_type: record.variant.clone(),
            matrix_format: labels
                .matrix_format
                .clone()
                .or_else(|| record.matrix_format.clone())
                .unwrap_or_else(|| UNKNOWN_MATRIX_FORMAT.to_string()),
            tolerance_type: labels.norm_type.to_string(),
            batch_size: record.batch_size,
            solve_time: record.metric_value,
        })
        .collect()
}

// ============================================================================
// Plot styling
// ============================================================================

/// Resolved style of one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Marker symbol, e.g. `x` or `^`.
    pub marker: String,
    /// Colour name or single-letter code.
    pub color: String,
    /// Line dash pattern, e.g. `-` or `--`.
    pub line_type: String,
    /// Line width in points.
    pub line_width: f64,
    /// Marker size in points.
    pub marker_size: f64,
    /// Marker edge width in points.
    pub marker_edge_width: f64,
}

/// Style cycles shared by all series of a figure.
///
/// Series `i` takes entry `i mod len` of each cycle, so any number of
/// variants can be plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// Marker cycle.
    pub markers: Vec<String>,
    /// Colour cycle.
    pub colors: Vec<String>,
    /// Line dash pattern cycle.
    pub line_types: Vec<String>,
    /// Line width shared by every series.
    pub line_width: f64,
    /// Marker size shared by every series.
    pub marker_size: f64,
    /// Marker edge width shared by every series.
    pub marker_edge_width: f64,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            markers: strings(&[".", "x", "+", "^", "v", "<", ">", "d"]),
            colors: strings(&["k", "b", "r", "g", "c", "m", "orange", "pink"]),
            line_types: strings(&["-", "--", "-.", ":", "--", "-.", "--", ":"]),
            line_width: 0.75,
            marker_size: 5.0,
            marker_edge_width: 1.0,
        }
    }
}

impl PlotStyle {
    /// Style used when comparing several exported tables, which usually come
    /// in pairs (two processors or two formats per solver).
    pub fn paired() -> Self {
        Self {
            markers: strings(&["+", ".", "+", ".", "v", "<", ">", "d", "x", "^"]),
            colors: strings(&["g", "g", "r", "r", "b", "m", "pink", "k", "c", "orange"]),
            marker_size: 7.0,
            ..Self::default()
        }
    }

    /// Style of series `index`.
    pub fn series_style(&self, index: usize) -> SeriesStyle {
        SeriesStyle {
            marker: cycle(&self.markers, index),
            color: cycle(&self.colors, index),
            line_type: cycle(&self.line_types, index),
            line_width: self.line_width,
            marker_size: self.marker_size,
            marker_edge_width: self.marker_edge_width,
        }
    }
}

fn cycle(items: &[String], index: usize) -> String {
    if items.is_empty() {
        return String::new();
    }
    items[index % items.len()].clone()
}

/// Unit of plotted times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds, as recorded in the documents.
    #[default]
    #[serde(rename = "s")]
    Seconds,
    /// Milliseconds.
    #[serde(rename = "ms")]
    Milliseconds,
}

impl TimeUnit {
    /// Factor converting seconds into this unit.
    pub fn scale(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1000.0,
        }
    }

    /// Short unit symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Seconds),
            "ms" => Ok(TimeUnit::Milliseconds),
            other => Err(format!("unknown time unit '{}' (expected 's' or 'ms')", other)),
        }
    }
}

/// What a timing series is labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesLabel {
    /// The solver name.
    #[default]
    Variant,
    /// The series' matrix format, falling back to the solver name.
    MatrixFormat,
}

/// Options for timing figures.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotOptions {
    /// Unit of the time axis.
    pub unit: TimeUnit,
    /// Logarithmic y axis.
    pub log_y: bool,
    /// What each series is labelled with.
    pub label_by: SeriesLabel,
    /// Style cycles of the series.
    pub style: PlotStyle,
}

// ============================================================================
// Figures
// ============================================================================

/// How the series of a figure are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    /// Lines through markers.
    #[default]
    Line,
    /// Grouped bars; x values are category positions named by `x_ticks`.
    Bar,
}

/// One labelled, styled point sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Legend entry.
    pub label: String,
    /// How the series is drawn.
    pub style: SeriesStyle,
    /// `(x, y)` points in drawing order.
    pub points: Vec<(f64, f64)>,
}

/// Render-ready description of one output figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotFigure {
    /// Output name without extension, e.g. `case7-timings`.
    pub file_stem: String,
    /// Line or grouped-bar figure.
    pub kind: FigureKind,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Logarithmic y axis.
    pub log_y: bool,
    /// Category names of a bar figure, by x position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x_ticks: Vec<String>,
    /// Series in legend order.
    pub series: Vec<PlotSeries>,
}

impl PlotFigure {
    /// An empty line figure.
    pub fn line(
        file_stem: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            file_stem: file_stem.into(),
            kind: FigureKind::Line,
            x_label: x_label.into(),
            y_label: y_label.into(),
            log_y: false,
            x_ticks: Vec::new(),
            series: Vec::new(),
        }
    }
}

/// Consumer of finished figures.
pub trait PlotSink {
    /// Error raised while writing a figure.
    type Error;

    /// Write one figure and return where it went.
    fn write_figure(&mut self, figure: &PlotFigure) -> std::result::Result<PathBuf, Self::Error>;
}

/// Plot points and label of one sorted series.
pub fn plot_series(series: &SortedSeries, index: usize, options: &PlotOptions) -> PlotSeries {
    let scale = options.unit.scale();
    let label = match options.label_by {
        SeriesLabel::Variant => series.variant().to_string(),
        SeriesLabel::MatrixFormat => series
            .matrix_format()
            .unwrap_or_else(|| series.variant())
            .to_string(),
    };

    PlotSeries {
        label,
        style: options.style.series_style(index),
        points: series
            .points()
            .into_iter()
            .map(|(x, y)| (x, y * scale))
            .collect(),
    }
}

/// Timing figure of one case: one series per bucket against batch size.
pub fn timing_figure(case: &SortedCase, options: &PlotOptions) -> PlotFigure {
    let mut figure = PlotFigure::line(
        format!("{}-timings", case.case_name),
        "No. matrices in the batch",
        format!("Time ({})", options.unit),
    );
    figure.log_y = options.log_y;
    figure.series = case
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| plot_series(series, i, options))
        .collect();
    figure
}

/// Combined figure of several exported tables.
///
/// A table written by the `table` export holds every solver of a case, so
/// each table is split into one series per `(processor, solver type, matrix
/// format)`, in the order the rows first name them. Series are labelled
/// `processor,solver type,matrix format` and keep their rows' order.
///
/// # Errors
///
/// Returns [`BenchError::MissingField`] when a table has no rows.
pub fn tables_figure(
    tables: &[(String, Vec<TableRecord>)],
    options: &PlotOptions,
) -> Result<PlotFigure> {
    let mut figure = PlotFigure::line(
        "timings",
        "Batch size",
        format!("Time ({})", options.unit),
    );
    figure.log_y = options.log_y;
    let scale = options.unit.scale();

    for (name, rows) in tables {
        if rows.is_empty() {
            return Err(BenchError::missing_field("rows", name.as_str()));
        }

        let first_series = figure.series.len();
        for row in rows {
            let label = format!("{},{},{}", row.processor, row.solver_type, row.matrix_format);
            let point = (row.batch_size as f64, row.solve_time * scale);
            match figure.series[first_series..]
                .iter_mut()
                .find(|s| s.label == label)
            {
                Some(series) => series.points.push(point),
                None => {
                    let index = figure.series.len();
                    figure.series.push(PlotSeries {
                        label,
                        style: options.style.series_style(index),
                        points: vec![point],
                    });
                }
            }
        }
    }

    Ok(figure)
}
