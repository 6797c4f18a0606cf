//! Main application state and TUI event loop for Stride Dashboard.
//!
//! [`App`] owns the theme, view mode, and the last received dashboard
//! update. Updates arrive from the reload orchestrator over a channel and
//! are drained on every tick.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use stride_runtime::orchestrator::{DashboardUpdate, ReloadHandle};

use crate::components::header::Header;
use crate::dashboard_view;
use crate::export;
use crate::table_view;
use crate::themes::Theme;

/// Lines taken by the header component.
const HEADER_HEIGHT: u16 = 4;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Summaries and the two stride charts.
    Dashboard,
    /// Scrollable combined stride table.
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Dashboard => ViewMode::Table,
            ViewMode::Table => ViewMode::Dashboard,
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Reload,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Stride Dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Upload slot being watched, shown until the first update arrives.
    pub slot: PathBuf,
    /// Where `e` writes SVG charts; `None` disables export.
    pub export_dir: Option<PathBuf>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Most recent pipeline outcome, `None` until the first run reports.
    pub last_update: Option<DashboardUpdate>,
    /// One-line status shown in the footer.
    pub status: Option<String>,
    /// First visible row in the table view.
    pub table_offset: usize,
}

impl App {
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        slot: PathBuf,
        export_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            slot,
            export_dir,
            should_quit: false,
            last_update: None,
            status: None,
            table_offset: 0,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the dashboard TUI, receiving pipeline results from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while updates
    /// arrive on the async channel via `try_recv`.
    ///
    /// The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<DashboardUpdate>,
        handle: &ReloadHandle,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => match self.handle_key(key) {
                        KeyAction::Quit => break Ok(()),
                        KeyAction::Reload => handle.request_reload(),
                        KeyAction::None => {}
                    },
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            // Drain any pending updates (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(update) => self.update_from(update),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State updates ─────────────────────────────────────────────────────────

    /// Replace the displayed result with a fresh pipeline outcome.
    ///
    /// A failed run replaces the previous report too; the error stays on
    /// screen until the next valid upload.
    pub fn update_from(&mut self, update: DashboardUpdate) {
        let same_source = match (&self.last_update, &update.outcome) {
            (Some(prev), Ok(result)) => prev
                .outcome
                .as_ref()
                .is_ok_and(|p| p.metadata.source == result.metadata.source),
            _ => false,
        };
        if !same_source {
            self.table_offset = 0;
        }
        self.status = None;
        self.last_update = Some(update);
    }

    /// Apply a key press to the app state.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Char('t') | KeyCode::Tab => {
                self.view_mode = self.view_mode.toggled();
                KeyAction::None
            }
            KeyCode::Char('r') => {
                self.status = Some("Reloading...".to_string());
                KeyAction::Reload
            }
            KeyCode::Char('e') => {
                self.export();
                KeyAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_by(1);
                KeyAction::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_by(-1);
                KeyAction::None
            }
            KeyCode::PageDown => {
                self.scroll_by(10);
                KeyAction::None
            }
            KeyCode::PageUp => {
                self.scroll_by(-10);
                KeyAction::None
            }
            KeyCode::Home => {
                self.table_offset = 0;
                KeyAction::None
            }
            _ => KeyAction::None,
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn scroll_by(&mut self, delta: isize) {
        if self.view_mode != ViewMode::Table {
            return;
        }
        let len = self
            .last_update
            .as_ref()
            .and_then(|u| u.outcome.as_ref().ok())
            .map_or(0, |r| r.report.table.len());
        let next = self.table_offset.saturating_add_signed(delta);
        self.table_offset = next.min(len.saturating_sub(1));
    }

    fn export(&mut self) {
        let Some(dir) = self.export_dir.clone() else {
            self.status = Some("Export disabled: start with --export-dir <DIR>".to_string());
            return;
        };
        let Some(result) = self
            .last_update
            .as_ref()
            .and_then(|u| u.outcome.as_ref().ok())
        else {
            self.status = Some("Nothing to export".to_string());
            return;
        };

        self.status = Some(match export::export_charts(&result.report, &dir) {
            Ok(paths) if paths.is_empty() => "No charts to export".to_string(),
            Ok(paths) => format!("Exported {} charts to {}", paths.len(), dir.display()),
            Err(e) => {
                tracing::warn!(error = %e, "chart export failed");
                format!("Export failed: {}", e)
            }
        });
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let [header_area, body, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let (source, loaded_at) = match &self.last_update {
            Some(update) => {
                let source = match &update.outcome {
                    Ok(result) => file_label(&result.metadata.source),
                    Err(_) => file_label(&update.slot),
                };
                (
                    source,
                    update
                        .loaded_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                )
            }
            None => (file_label(&self.slot), "-".to_string()),
        };
        let header = Header::new(&source, &loaded_at, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        match &self.last_update {
            None => {
                dashboard_view::render_waiting(
                    frame,
                    body,
                    &self.slot.display().to_string(),
                    &self.theme,
                );
            }
            Some(update) => match (&update.outcome, self.view_mode) {
                (Err(message), _) => {
                    dashboard_view::render_error(frame, body, message, &self.theme);
                }
                (Ok(result), ViewMode::Dashboard) => {
                    dashboard_view::render_dashboard_view(frame, body, &result.report, &self.theme);
                }
                (Ok(result), ViewMode::Table) => {
                    if result.report.table.is_empty() {
                        table_view::render_no_data(frame, body, &self.theme);
                    } else {
                        table_view::render_table_view(
                            frame,
                            body,
                            &result.report.table,
                            self.table_offset,
                            &self.theme,
                        );
                    }
                }
            },
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer);
    }

    fn footer_line(&self) -> Line<'_> {
        if let Some(status) = &self.status {
            return Line::from(Span::styled(status.as_str(), self.theme.info));
        }
        let hints = match self.view_mode {
            ViewMode::Dashboard => "q quit  t table  r reload  e export",
            ViewMode::Table => "q quit  t dashboard  j/k scroll  r reload  e export",
        };
        Line::from(Span::styled(hints, self.theme.dim))
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use stride_runtime::data::analysis::{analyze_document, AnalysisMetadata, AnalysisResult};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_update(n_strides: usize, source: &str) -> DashboardUpdate {
        let strides: Vec<_> = (0..n_strides)
            .map(|i| {
                json!({
                    "mid_step_in_milliseconds": i * 100,
                    "stride_velocity_in_cmps": 300,
                    "stride_length_in_cm": 90
                })
            })
            .collect();
        let report = analyze_document(&json!({
            "shoe_one": {"total_steps": 120, "distance_in_cm": 9000, "segments": [{"strides": strides}]}
        }));
        DashboardUpdate {
            outcome: Ok(AnalysisResult {
                report,
                metadata: AnalysisMetadata {
                    source: PathBuf::from(source),
                    load_time_seconds: 0.0,
                    transform_time_seconds: 0.0,
                },
            }),
            slot: PathBuf::from(source),
            loaded_at: Utc::now(),
            run_number: 1,
        }
    }

    fn make_failed_update() -> DashboardUpdate {
        DashboardUpdate {
            outcome: Err("Failed to parse JSON: expected value at line 1 column 1".to_string()),
            slot: PathBuf::from("/data/run.json"),
            loaded_at: Utc::now(),
            run_number: 2,
        }
    }

    fn new_app() -> App {
        App::new("dark", ViewMode::Dashboard, PathBuf::from("/data/run.json"), None)
    }

    fn render_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── ViewMode ──────────────────────────────────────────────────────────────

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Dashboard.toggled(), ViewMode::Table);
        assert_eq!(ViewMode::Table.toggled(), ViewMode::Dashboard);
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = new_app();
        assert_eq!(app.view_mode, ViewMode::Dashboard);
        assert!(!app.should_quit);
        assert!(app.last_update.is_none());
        assert!(app.status.is_none());
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        let app = App::new("neon", ViewMode::Table, PathBuf::from("x.json"), None);
        assert_eq!(app.view_mode, ViewMode::Table);
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Char('Q'))), KeyAction::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_toggle_and_reload_keys() {
        let mut app = new_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('t'))), KeyAction::None);
        assert_eq!(app.view_mode, ViewMode::Table);
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), KeyAction::Reload);
        assert_eq!(app.status.as_deref(), Some("Reloading..."));
    }

    #[test]
    fn test_scroll_is_clamped_to_table() {
        let mut app = new_app();
        app.update_from(make_update(3, "/data/run.json"));

        // Scrolling is ignored on the dashboard.
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.table_offset, 0);

        app.view_mode = ViewMode::Table;
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.table_offset, 2);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.table_offset, 1);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn test_export_without_dir_sets_status() {
        let mut app = new_app();
        app.update_from(make_update(2, "/data/run.json"));
        app.handle_key(key(KeyCode::Char('e')));
        assert!(app.status.as_deref().unwrap().contains("--export-dir"));
    }

    #[test]
    fn test_export_writes_charts() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(
            "dark",
            ViewMode::Dashboard,
            PathBuf::from("/data/run.json"),
            Some(dir.path().to_path_buf()),
        );
        app.update_from(make_update(2, "/data/run.json"));
        app.handle_key(key(KeyCode::Char('e')));

        assert!(app.status.as_deref().unwrap().starts_with("Exported 2 charts"));
        assert!(dir.path().join("stride_velocity.svg").exists());
        assert!(dir.path().join("stride_length.svg").exists());
    }

    #[test]
    fn test_export_after_failure_has_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(
            "dark",
            ViewMode::Dashboard,
            PathBuf::from("/data/run.json"),
            Some(dir.path().to_path_buf()),
        );
        app.update_from(make_failed_update());
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.status.as_deref(), Some("Nothing to export"));
    }

    // ── update_from ───────────────────────────────────────────────────────────

    #[test]
    fn test_update_from_replaces_previous() {
        let mut app = new_app();
        app.update_from(make_update(1, "/data/run.json"));
        app.update_from(make_failed_update());
        assert!(app.last_update.as_ref().unwrap().outcome.is_err());

        app.update_from(make_update(4, "/data/run.json"));
        let result = app.last_update.as_ref().unwrap().outcome.as_ref().unwrap();
        assert_eq!(result.report.table.len(), 4);
    }

    #[test]
    fn test_update_from_new_source_resets_scroll() {
        let mut app = new_app();
        app.view_mode = ViewMode::Table;
        app.update_from(make_update(20, "/data/monday.json"));
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.table_offset, 10);

        app.update_from(make_update(20, "/data/monday.json"));
        assert_eq!(app.table_offset, 10);

        app.update_from(make_update(20, "/data/tuesday.json"));
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn test_update_from_clears_status() {
        let mut app = new_app();
        app.handle_key(key(KeyCode::Char('r')));
        app.update_from(make_update(1, "/data/run.json"));
        assert!(app.status.is_none());
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_waiting_before_first_update() {
        let app = new_app();
        let text = render_text(&app, 100, 30);
        assert!(text.contains("STRIDE DASHBOARD"));
        assert!(text.contains("Loading upload"));
        assert!(text.contains("[ run.json | - ]"));
    }

    #[test]
    fn test_render_dashboard_after_update() {
        let mut app = new_app();
        app.update_from(make_update(3, "/data/run.json"));
        let text = render_text(&app, 120, 50);
        assert!(text.contains("Shoe One Summary"));
        assert!(text.contains("Total Steps: 120"));
        assert!(text.contains("Stride Length Over Time"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_render_error_panel_after_failure() {
        let mut app = new_app();
        app.update_from(make_update(3, "/data/run.json"));
        app.update_from(make_failed_update());
        let text = render_text(&app, 120, 30);
        assert!(text.contains("Could not load the upload"));
        assert!(!text.contains("Shoe One Summary"));
    }

    #[test]
    fn test_render_table_view() {
        let mut app = new_app();
        app.view_mode = ViewMode::Table;
        app.update_from(make_update(3, "/data/run.json"));
        let text = render_text(&app, 100, 30);
        assert!(text.contains("Strides 1-3 of 3"));
        assert!(text.contains("j/k scroll"));
    }

    #[test]
    fn test_render_table_view_without_strides() {
        let mut app = new_app();
        app.view_mode = ViewMode::Table;
        app.update_from(make_update(0, "/data/run.json"));
        let text = render_text(&app, 100, 30);
        assert!(text.contains("No strides in this upload"));
    }
}
