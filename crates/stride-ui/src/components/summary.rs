//! Per-shoe summary section.

use ratatui::text::{Line, Span};
use stride_core::formatting::format_duration_ms;
use stride_core::models::ShoeSummary;

use crate::themes::Theme;

/// Lines every summary section renders, heading included.
pub const SUMMARY_HEIGHT: u16 = 5;

/// A `"<Shoe> Summary"` section: heading, steps line, distance line, then
/// duration and stride count.
pub struct SummarySection<'a> {
    pub summary: &'a ShoeSummary,
    pub theme: &'a Theme,
}

impl<'a> SummarySection<'a> {
    pub fn new(summary: &'a ShoeSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let s = self.summary;
        vec![
            Line::from(Span::styled(s.heading(), self.theme.section_title)),
            Line::from(Span::styled(s.steps_line(), self.theme.value)),
            Line::from(Span::styled(s.distance_line(), self.theme.value)),
            Line::from(vec![
                Span::styled("Duration: ", self.theme.label),
                Span::styled(format_duration_ms(s.duration_ms), self.theme.text),
            ]),
            Line::from(vec![
                Span::styled("Strides: ", self.theme.label),
                Span::styled(s.stride_count.to_string(), self.theme.text),
            ]),
        ]
    }
}
