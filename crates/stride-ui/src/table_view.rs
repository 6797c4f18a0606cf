//! Combined stride table view.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per stride of
//! every present shoe, in combined order, plus a highlighted averages row at
//! the bottom. The view scrolls by row offset.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use stride_core::formatting;
use stride_core::models::StrideRow;
use stride_data::table::StrideTable;

use crate::themes::Theme;

/// Rows taken up by borders, the header, and the averages row.
const CHROME_ROWS: u16 = 4;

/// Aggregates shown in the table's bottom row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableTotals {
    pub stride_count: usize,
    pub mean_velocity: f64,
    pub mean_length: f64,
}

impl TableTotals {
    pub fn from_rows(rows: &[StrideRow]) -> Self {
        let n = rows.len();
        if n == 0 {
            return Self {
                stride_count: 0,
                mean_velocity: 0.0,
                mean_length: 0.0,
            };
        }
        Self {
            stride_count: n,
            mean_velocity: rows.iter().map(|r| r.stride_velocity).sum::<f64>() / n as f64,
            mean_length: rows.iter().map(|r| r.stride_length).sum::<f64>() / n as f64,
        }
    }
}

/// Number of data rows that fit in `area_height`.
pub fn visible_rows(area_height: u16) -> usize {
    area_height.saturating_sub(CHROME_ROWS) as usize
}

/// Largest useful scroll offset for `len` rows in `area_height`.
pub fn max_offset(len: usize, area_height: u16) -> usize {
    len.saturating_sub(visible_rows(area_height).max(1))
}

/// Render the combined stride table into `area`, starting at row `offset`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    table: &StrideTable,
    offset: usize,
    theme: &Theme,
) {
    let header_cells = ["#", "Shoe", "Mid-step (ms)", "Velocity (cm/s)", "Length (cm)"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let offset = offset.min(max_offset(table.len(), area.height));
    let data_rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows(area.height))
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(row.shoe.clone()),
                Cell::from(formatting::format_number(row.mid_step_time, 0)),
                Cell::from(formatting::format_number(row.stride_velocity, 1)),
                Cell::from(formatting::format_number(row.stride_length, 1)),
            ])
            .style(style)
        })
        .collect();

    let totals = TableTotals::from_rows(&table.rows);
    let total_row = Row::new(vec![
        Cell::from("AVG"),
        Cell::from(format!("{} strides", totals.stride_count)),
        Cell::from(""),
        Cell::from(formatting::format_number(totals.mean_velocity, 1)),
        Cell::from(formatting::format_number(totals.mean_length, 1)),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Length(17),
        Constraint::Length(13),
    ];

    let last = (offset + visible_rows(area.height)).min(table.len());
    let title = format!(" Strides {}-{} of {} ", offset + 1, last, table.len());

    let widget = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);

    frame.render_widget(widget, area);
}

/// Placeholder shown when the combined table has no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No strides in this upload", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 't' to return to the dashboard", theme.dim)),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text))
            .block(Block::default().borders(Borders::ALL).title(" Strides ")),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
