//! Dashboard view: per-shoe summaries above the two stride charts.
//!
//! Summary sections sit side by side in one row; the velocity and length
//! charts split the remaining height. Each chart draws one line per shoe
//! with a legend keyed by the shoe label.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap},
    Frame,
};

use stride_core::models::ChartSpec;
use stride_data::analysis::DashboardReport;

use crate::components::summary::{SummarySection, SUMMARY_HEIGHT};
use crate::themes::Theme;

/// Render summaries and charts for `report` into `area`.
pub fn render_dashboard_view(frame: &mut Frame, area: Rect, report: &DashboardReport, theme: &Theme) {
    if report.summaries.is_empty() && !report.has_charts() {
        render_no_data(frame, area, theme);
        return;
    }

    let summary_height = if report.summaries.is_empty() {
        0
    } else {
        SUMMARY_HEIGHT + 2
    };
    let rows = Layout::vertical([Constraint::Length(summary_height), Constraint::Min(0)]).split(area);

    if !report.summaries.is_empty() {
        let columns = Layout::horizontal(
            report
                .summaries
                .iter()
                .map(|_| Constraint::Ratio(1, report.summaries.len() as u32)),
        )
        .split(rows[0]);

        for (summary, column) in report.summaries.iter().zip(columns.iter()) {
            let lines = SummarySection::new(summary, theme).to_lines();
            let paragraph = Paragraph::new(Text::from(lines)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.chart_border),
            );
            frame.render_widget(paragraph, *column);
        }
    }

    if report.has_charts() {
        let charts: Vec<&ChartSpec> = report.charts().collect();
        let slots = Layout::vertical(charts.iter().map(|_| Constraint::Ratio(1, charts.len() as u32)))
            .split(rows[1]);
        for (chart, slot) in charts.into_iter().zip(slots.iter()) {
            render_chart(frame, *slot, chart, theme);
        }
    } else {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("No strides recorded in this upload", theme.dim)),
        ];
        frame.render_widget(
            Paragraph::new(Text::from(text))
                .block(Block::default().borders(Borders::ALL).border_style(theme.chart_border)),
            rows[1],
        );
    }
}

/// Draw one stride chart: a line per series, axis titles, and a legend.
pub fn render_chart(frame: &mut Frame, area: Rect, chart: &ChartSpec, theme: &Theme) {
    let x = axis_bounds(chart.x_bounds());
    let y = axis_bounds(chart.y_bounds());

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            // A single point has no segment to draw.
            let graph_type = if series.points.len() == 1 {
                GraphType::Scatter
            } else {
                GraphType::Line
            };
            Dataset::default()
                .name(series.label.clone())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(theme.shoe_style(&series.label, i))
                .data(&series.points)
        })
        .collect();

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(Span::styled(format!(" {} ", chart.title), theme.bold)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_label.clone(), theme.label))
                .style(theme.chart_axis)
                .bounds(x)
                .labels(axis_labels(x, 0)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_label.clone(), theme.label))
                .style(theme.chart_axis)
                .bounds(y)
                .labels(axis_labels(y, 1)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    frame.render_widget(widget, area);
}

/// Axis bounds with a little headroom; a degenerate range is widened so the
/// point does not sit on the border.
pub(crate) fn axis_bounds(range: Option<(f64, f64)>) -> [f64; 2] {
    match range {
        None => [0.0, 1.0],
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => [lo - 1.0, hi + 1.0],
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            [lo - pad, hi + pad]
        }
    }
}

fn axis_labels(bounds: [f64; 2], decimals: usize) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::raw(format!("{:.*}", decimals, v)))
        .collect()
}

/// Placeholder shown when the upload holds neither shoe.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No shoe data found in this upload", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Expected a top-level \"shoe_one\" or \"shoe_two\" record.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .block(Block::default().borders(Borders::ALL).title(" Stride Dashboard ")),
        area,
    );
}

/// Shown instead of the dashboard when the last upload could not be used.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Could not load the upload", theme.error)),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.text)),
        Line::from(""),
        Line::from(Span::styled(
            "Replace the file to retry, or press 'r' to reload.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Error ")),
        area,
    );
}

/// Shown before the first pipeline run has reported back.
pub fn render_waiting(frame: &mut Frame, area: Rect, slot: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Loading upload...", theme.info)),
        Line::from(Span::styled(slot.to_string(), theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .block(Block::default().borders(Borders::ALL).title(" Stride Dashboard ")),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
