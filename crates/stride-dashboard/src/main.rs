mod bootstrap;

use std::path::Path;

use anyhow::{bail, Context, Result};
use stride_core::settings::Settings;
use stride_data::analysis::analyze_upload;
use stride_runtime::orchestrator::ReloadOrchestrator;
use stride_ui::app::{App, ViewMode};
use stride_ui::export::export_charts;
use stride_ui::report::render_text_report;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;

    // Terminal views own stdout and stderr, so their logs go to a file.
    let log_file = settings
        .log_file
        .clone()
        .or_else(|| (settings.view != "report").then(bootstrap::default_log_path));
    bootstrap::setup_logging(&settings.log_level, log_file.as_ref())?;

    tracing::info!("Stride Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Refresh: {}s",
        settings.view,
        settings.theme,
        settings.refresh_rate
    );

    let Some(slot) = settings.file.clone() else {
        if settings.clear {
            println!("Saved configuration cleared.");
            return Ok(());
        }
        bail!("no upload given: pass a JSON export or a drop directory, e.g. `stride-dashboard run.json`");
    };

    match settings.view.as_str() {
        "report" => run_report(&slot, settings.export_dir.as_deref())?,

        "dashboard" | "table" => {
            tracing::info!(slot = %slot.display(), "watching upload slot");

            let orchestrator =
                ReloadOrchestrator::new(u64::from(settings.refresh_rate), slot.clone());
            let (rx, handle) = orchestrator.start();

            let view_mode = if settings.view == "table" {
                ViewMode::Table
            } else {
                ViewMode::Dashboard
            };
            let export_dir = settings
                .export_dir
                .clone()
                .unwrap_or_else(bootstrap::default_export_dir);
            let app = App::new(&settings.theme, view_mode, slot, Some(export_dir));

            // The loop exits on 'q' / Ctrl+C inside the TUI. Ctrl+C is also
            // caught at the OS level in case it arrives outside raw mode.
            tokio::select! {
                result = app.run(rx, &handle) => {
                    handle.abort();
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down reload task");
                    handle.abort();
                }
            }
        }

        unknown => bail!("unknown view mode: {}", unknown),
    }

    Ok(())
}

/// Print the summaries for one upload and optionally export its charts.
fn run_report(slot: &Path, export_dir: Option<&Path>) -> Result<()> {
    let result =
        analyze_upload(slot).with_context(|| format!("failed to analyse {}", slot.display()))?;

    print!("{}", render_text_report(&result.report));

    if let Some(dir) = export_dir {
        let written = export_charts(&result.report, dir)
            .with_context(|| format!("failed to export charts to {}", dir.display()))?;
        for path in written {
            println!("Exported {}", path.display());
        }
    }

    Ok(())
}
