//! SVG export of the stride charts.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use stride_core::error::{Result, StrideError};
use stride_core::models::ChartSpec;
use stride_data::analysis::DashboardReport;
use stride_data::table::StrideMetric;

use crate::dashboard_view::axis_bounds;

const CHART_SIZE: (u32, u32) = (1280, 720);

/// Line colours, one per shoe in presentation order.
const SERIES_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

/// Write `stride_velocity.svg` and `stride_length.svg` into `dir`.
///
/// Charts that are absent (no strides in the upload) are skipped. Returns the
/// paths actually written.
pub fn export_charts(report: &DashboardReport, dir: &Path) -> Result<Vec<PathBuf>> {
    if !report.has_charts() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(dir)?;

    let charts = [
        (StrideMetric::Velocity, report.velocity_chart.as_ref()),
        (StrideMetric::Length, report.length_chart.as_ref()),
    ];

    let mut written = Vec::new();
    for (metric, chart) in charts {
        let Some(chart) = chart else { continue };
        let path = dir.join(format!("{}.svg", metric.file_stem()));
        render_chart_svg(chart, &path)?;
        info!(path = %path.display(), "exported chart");
        written.push(path);
    }
    Ok(written)
}

/// Render a single chart as an SVG file at `path`.
pub fn render_chart_svg(chart: &ChartSpec, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    draw_chart(&root, chart)
        .map_err(|e| StrideError::Export(format!("{}: {}", path.display(), e)))
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartSpec,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let [x_lo, x_hi] = axis_bounds(chart.x_bounds());
    let [y_lo, y_hi] = axis_bounds(chart.y_bounds());

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title.as_str(), ("sans-serif", 28).into_font())
        .margin(25)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = match series.label.as_str() {
            "shoe_one" => SERIES_COLORS[0],
            "shoe_two" => SERIES_COLORS[1],
            _ => SERIES_COLORS[idx % SERIES_COLORS.len()],
        };
        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: 2,
        };
        ctx.draw_series(LineSeries::new(series.points.iter().copied(), style).point_size(3))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], color));
    }

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
