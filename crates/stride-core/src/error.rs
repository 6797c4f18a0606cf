use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Stride Dashboard.
#[derive(Error, Debug)]
pub enum StrideError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The uploaded bytes are not well-formed JSON.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The upload slot points at a path that does not exist.
    #[error("Upload not found: {0}")]
    UploadNotFound(PathBuf),

    /// A drop directory was given but contains no `.json` files.
    #[error("No JSON documents found in {0}")]
    NoDocument(PathBuf),

    /// A chart could not be written to disk.
    #[error("Chart export failed: {0}")]
    Export(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the stride crates.
pub type Result<T> = std::result::Result<T, StrideError>;
