//! Change-tracking wrapper around the upload slot.
//!
//! The slot is the path the user points the dashboard at. Replacing the file
//! (or dropping a newer export into a watched directory) counts as a new
//! upload. [`UploadSlot::poll`] re-runs the whole pipeline only when the
//! resolved document's fingerprint changes, or when forced.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use stride_data::analysis::{analyze_upload, AnalysisResult};
use stride_data::loader::resolve_upload;

/// Identity of a resolved document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    source: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

impl Fingerprint {
    fn of(source: PathBuf) -> std::io::Result<Self> {
        let meta = std::fs::metadata(&source)?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
            source,
        })
    }
}

/// The "currently uploaded file" slot.
pub struct UploadSlot {
    /// File or drop directory supplied by the user.
    path: PathBuf,
    /// Fingerprint of the document used in the last run.
    last_fingerprint: Option<Fingerprint>,
    /// Message of the last failed run, if the last run failed.
    last_error: Option<String>,
    /// Number of completed pipeline runs (successful or not).
    runs: u64,
}

impl UploadSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_fingerprint: None,
            last_error: None,
            runs: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Message of the last failed run, or `None` after a success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Check the slot and run the pipeline if it holds a new upload.
    ///
    /// Returns `None` when nothing changed since the previous run. A failed
    /// run is reported once; the same failure is not repeated on later polls
    /// unless `force` is set.
    pub fn poll(&mut self, force: bool) -> Option<Result<AnalysisResult, String>> {
        let fingerprint = resolve_upload(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|source| Fingerprint::of(source).map_err(|e| e.to_string()));

        let fingerprint = match fingerprint {
            Ok(fp) => fp,
            Err(message) => {
                let repeated =
                    self.last_fingerprint.is_none() && self.last_error.as_ref() == Some(&message);
                if repeated && !force {
                    return None;
                }
                tracing::warn!(slot = %self.path.display(), error = %message, "upload unavailable");
                self.last_fingerprint = None;
                self.last_error = Some(message.clone());
                self.runs += 1;
                return Some(Err(message));
            }
        };

        if !force && self.last_fingerprint.as_ref() == Some(&fingerprint) {
            tracing::debug!("upload unchanged; skipping run");
            return None;
        }

        tracing::debug!(source = %fingerprint.source.display(), force, "running pipeline");
        let outcome = analyze_upload(&fingerprint.source).map_err(|e| e.to_string());

        self.last_error = outcome.as_ref().err().cloned();
        if let Some(e) = &self.last_error {
            tracing::warn!(error = %e, "upload could not be analysed");
        }
        self.last_fingerprint = Some(fingerprint);
        self.runs += 1;

        Some(outcome)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
