//! Async reload orchestrator.
//!
//! Polls the [`UploadSlot`] in a tokio task and sends a [`DashboardUpdate`]
//! through an `mpsc` channel every time a new upload has been analysed, so
//! the TUI event loop can consume results without any shared mutable state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use stride_data::analysis::AnalysisResult;
use tokio::sync::{mpsc, Notify};
use tokio::time;

use crate::upload_slot::UploadSlot;

// ── Public types ──────────────────────────────────────────────────────────────

/// The outcome of one pipeline run, forwarded to the TUI layer.
#[derive(Debug, Clone)]
pub struct DashboardUpdate {
    /// The report, or the message of the error that aborted the run.
    pub outcome: Result<AnalysisResult, String>,
    /// The upload slot the run was triggered for.
    pub slot: PathBuf,
    /// When the run finished.
    pub loaded_at: DateTime<Utc>,
    /// 1-based run counter since startup.
    pub run_number: u64,
}

// ── ReloadOrchestrator ────────────────────────────────────────────────────────

/// Background upload watcher.
///
/// Call [`ReloadOrchestrator::start`] to spin up the polling loop and receive
/// a channel endpoint for [`DashboardUpdate`]s.
pub struct ReloadOrchestrator {
    /// How often to check the slot for a new upload.
    poll_interval: Duration,
    /// File or drop directory to watch.
    slot: PathBuf,
}

impl ReloadOrchestrator {
    pub fn new(poll_interval_secs: u64, slot: PathBuf) -> Self {
        Self {
            poll_interval: Duration::from_secs(poll_interval_secs),
            slot,
        }
    }

    /// Start the polling loop.
    ///
    /// Returns the receiver for updates and a [`ReloadHandle`] that can force
    /// a reload or abort the loop.
    pub fn start(self) -> (mpsc::Receiver<DashboardUpdate>, ReloadHandle) {
        let (tx, rx) = mpsc::channel(16);
        let reload = Arc::new(Notify::new());
        let task_reload = Arc::clone(&reload);

        let handle = tokio::spawn(async move {
            self.reload_loop(tx, task_reload).await;
        });

        (rx, ReloadHandle { handle, reload })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Runs the pipeline immediately, then on every tick or reload request.
    /// Exits when the receiver side of the channel is closed.
    async fn reload_loop(self, tx: mpsc::Sender<DashboardUpdate>, reload: Arc<Notify>) {
        let mut slot = UploadSlot::new(self.slot);

        if !Self::run_and_send(&mut slot, &tx, true).await {
            return;
        }

        let mut interval = time::interval(self.poll_interval);
        // The first tick fires immediately; the initial run already happened.
        interval.tick().await;

        loop {
            let force = tokio::select! {
                _ = interval.tick() => false,
                _ = reload.notified() => {
                    tracing::info!("reload requested");
                    true
                }
            };

            if tx.is_closed() {
                tracing::debug!("update channel closed; exiting loop");
                break;
            }

            if !Self::run_and_send(&mut slot, &tx, force).await {
                break;
            }
        }
    }

    /// Poll the slot and forward any new outcome. Returns `false` once the
    /// receiver is gone.
    async fn run_and_send(
        slot: &mut UploadSlot,
        tx: &mpsc::Sender<DashboardUpdate>,
        force: bool,
    ) -> bool {
        let Some(outcome) = slot.poll(force) else {
            return true;
        };

        let update = DashboardUpdate {
            outcome,
            slot: slot.path().to_path_buf(),
            loaded_at: Utc::now(),
            run_number: slot.runs(),
        };

        if let Err(e) = tx.send(update).await {
            tracing::warn!(error = %e, "failed to send dashboard update; receiver dropped");
            return false;
        }
        true
    }
}

// ── ReloadHandle ──────────────────────────────────────────────────────────────

/// A handle to the background reload task.
#[derive(Debug)]
pub struct ReloadHandle {
    handle: tokio::task::JoinHandle<()>,
    reload: Arc<Notify>,
}

impl ReloadHandle {
    /// Re-run the pipeline even if the upload has not changed.
    pub fn request_reload(&self) {
        self.reload.notify_one();
    }

    /// Immediately abort the polling loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r#"{"shoe_two": {"segments": [{"strides": [
        {"mid_step_in_milliseconds": 100, "stride_velocity_in_cmps": 300, "stride_length_in_cm": 85}
    ]}]}}"#;

    async fn recv(rx: &mut mpsc::Receiver<DashboardUpdate>) -> DashboardUpdate {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("channel closed before receiving update")
    }

    #[test]
    fn test_orchestrator_creation() {
        let orch = ReloadOrchestrator::new(5, PathBuf::from("/tmp/run.json"));
        assert_eq!(orch.poll_interval, Duration::from_secs(5));
        assert_eq!(orch.slot, PathBuf::from("/tmp/run.json"));
    }

    #[tokio::test]
    async fn test_orchestrator_sends_initial_update() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, DOC).unwrap();

        let (mut rx, handle) = ReloadOrchestrator::new(60, path.clone()).start();
        let update = recv(&mut rx).await;

        assert_eq!(update.slot, path);
        assert_eq!(update.run_number, 1);
        let result = update.outcome.expect("valid document");
        assert_eq!(result.report.table.len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_orchestrator_reports_parse_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, "not json").unwrap();

        let (mut rx, handle) = ReloadOrchestrator::new(60, path).start();
        let update = recv(&mut rx).await;

        let err = update.outcome.expect_err("malformed document");
        assert!(err.contains("Failed to parse JSON"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_orchestrator_reload_request_reruns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, DOC).unwrap();

        let (mut rx, handle) = ReloadOrchestrator::new(60, path).start();
        let first = recv(&mut rx).await;
        assert_eq!(first.run_number, 1);

        handle.request_reload();
        let second = recv(&mut rx).await;
        assert_eq!(second.run_number, 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_orchestrator_start_and_abort() {
        let dir = TempDir::new().unwrap();
        let (_rx, handle) = ReloadOrchestrator::new(60, dir.path().to_path_buf()).start();

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    }
}
