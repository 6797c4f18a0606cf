//! Plain-text rendering of a report, for `--view report`.

use std::fmt::Write;

use stride_data::analysis::DashboardReport;

/// Render the summary sections followed by a one-line description of each
/// chart.
pub fn render_text_report(report: &DashboardReport) -> String {
    let mut out = String::new();

    if report.summaries.is_empty() && !report.has_charts() {
        out.push_str("No shoe data found in this upload.\n");
        return out;
    }

    for summary in &report.summaries {
        let _ = writeln!(out, "{}", summary.heading());
        let _ = writeln!(out, "{}", summary.steps_line());
        let _ = writeln!(out, "{}", summary.distance_line());
        out.push('\n');
    }

    for chart in report.charts() {
        let series: Vec<String> = chart
            .series
            .iter()
            .map(|s| format!("{} ({} points)", s.label, s.points.len()))
            .collect();
        let _ = writeln!(out, "{}: {}", chart.title, series.join(", "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stride_data::analysis::analyze_document;

    #[test]
    fn test_report_single_stride_scenario() {
        let report = analyze_document(&json!({
            "shoe_one": {
                "total_steps": 120,
                "distance_in_cm": 9000,
                "segments": [{"strides": [{
                    "mid_step_in_milliseconds": 500,
                    "stride_velocity_in_cmps": 350,
                    "stride_length_in_cm": 90
                }]}]
            }
        }));

        let text = render_text_report(&report);
        assert_eq!(
            text,
            "Shoe One Summary\n\
             Total Steps: 120\n\
             Total Distance: 90.0 meters\n\
             \n\
             Stride Velocity Over Time: shoe_one (1 points)\n\
             Stride Length Over Time: shoe_one (1 points)\n"
        );
    }

    #[test]
    fn test_report_only_shoe_two() {
        let report = analyze_document(&json!({"shoe_two": {"total_steps": 64}}));
        let text = render_text_report(&report);
        assert!(!text.contains("Shoe One Summary"));
        assert!(text.starts_with("Shoe Two Summary\nTotal Steps: 64\n"));
        assert!(!text.contains("Over Time"));
    }

    #[test]
    fn test_report_empty_document() {
        let report = analyze_document(&json!({}));
        assert_eq!(render_text_report(&report), "No shoe data found in this upload.\n");
    }
}
