//! Full pipeline for one upload.
//!
//! Runs load → extract → combine → group and returns an [`AnalysisResult`]
//! ready for the UI layer. Nothing is carried over between runs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;
use stride_core::error::Result;
use stride_core::models::{ChartSpec, ShoeSummary};
use tracing::info;

use crate::extractor::extract_all;
use crate::loader::{load_document_from_path, resolve_upload};
use crate::table::{build_chart, combine_tables, StrideMetric, StrideTable};

// ── Public types ──────────────────────────────────────────────────────────────

/// What the presenter needs: summaries, the combined table, and two charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardReport {
    /// One entry per present shoe, shoe_one first.
    pub summaries: Vec<ShoeSummary>,
    /// Combined stride rows of every present shoe.
    pub table: StrideTable,
    /// Velocity over time; `None` when the table is empty.
    pub velocity_chart: Option<ChartSpec>,
    /// Length over time; `None` when the table is empty.
    pub length_chart: Option<ChartSpec>,
}

impl DashboardReport {
    /// Both charts in display order.
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.velocity_chart.iter().chain(self.length_chart.iter())
    }

    pub fn has_charts(&self) -> bool {
        self.velocity_chart.is_some() || self.length_chart.is_some()
    }
}

/// Metadata produced alongside a report built from a file on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisMetadata {
    /// The document actually loaded (resolved from the upload slot).
    pub source: PathBuf,
    /// Wall-clock seconds spent reading and parsing the document.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent extracting and grouping.
    pub transform_time_seconds: f64,
}

/// The complete output of [`analyze_upload`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub report: DashboardReport,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Build the report for an already-parsed document.
pub fn analyze_document(document: &Value) -> DashboardReport {
    let shoes = extract_all(document);

    let summaries = shoes.iter().flatten().map(|s| s.summary()).collect();
    let table = combine_tables(&shoes);
    let velocity_chart = build_chart(&table, StrideMetric::Velocity);
    let length_chart = build_chart(&table, StrideMetric::Length);

    DashboardReport {
        summaries,
        table,
        velocity_chart,
        length_chart,
    }
}

/// Resolve the upload slot, load the document, and build its report.
///
/// Any I/O or parse failure aborts the whole run; there is no partial
/// report.
pub fn analyze_upload(slot: &Path) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let source = resolve_upload(slot)?;
    let document = load_document_from_path(&source)?;
    let load_time_seconds = load_start.elapsed().as_secs_f64();

    let transform_start = Instant::now();
    let report = analyze_document(&document);
    let transform_time_seconds = transform_start.elapsed().as_secs_f64();

    info!(
        source = %source.display(),
        shoes = report.summaries.len(),
        strides = report.table.len(),
        "analysis complete"
    );

    Ok(AnalysisResult {
        report,
        metadata: AnalysisMetadata {
            source,
            load_time_seconds,
            transform_time_seconds,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
