use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative marks placed either side of the application title.
pub const STRIDE_MARKS: &str = "» » »";

/// Dashboard header rendering four lines:
///
/// 1. Application title with stride marks (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Source document and load time in `[ source | loaded ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Display name of the loaded document (e.g. "run.json").
    pub source: &'a str,
    /// When the document was loaded, already formatted.
    pub loaded_at: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, loaded_at: &'a str, theme: &'a Theme) -> Self {
        Self {
            source,
            loaded_at,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(STRIDE_MARKS, self.theme.header_accent),
                Span::styled(" STRIDE DASHBOARD ", self.theme.header),
                Span::styled(STRIDE_MARKS, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.loaded_at, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
