//! Upload resolution and JSON loading.
//!
//! The upload slot is either a single export file or a drop directory; in
//! the latter case the most recently modified `.json` file inside it is the
//! current upload. Parsing is all-or-nothing: malformed JSON aborts the run.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value;
use stride_core::error::{Result, StrideError};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a whole JSON document from `reader`.
pub fn load_document<R: Read>(reader: R) -> Result<Value> {
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

/// Parse a whole JSON document from an in-memory buffer.
pub fn load_document_from_slice(bytes: &[u8]) -> Result<Value> {
    let value = serde_json::from_slice(bytes)?;
    Ok(value)
}

/// Read and parse the export at `path`.
pub fn load_document_from_path(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|source| StrideError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    load_document_from_slice(&bytes)
}

/// Resolve the upload slot to the document that should be loaded.
///
/// * A file is returned as-is.
/// * A directory resolves to its most recently modified `.json` file.
pub fn resolve_upload(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(StrideError::UploadNotFound(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    newest_json_file(path).ok_or_else(|| StrideError::NoDocument(path.to_path_buf()))
}

/// Find all `.json` files recursively under `dir`, sorted by path.
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Upload directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Most recently modified `.json` file under `dir`; ties go to the later path.
fn newest_json_file(dir: &Path) -> Option<PathBuf> {
    find_json_files(dir)
        .into_iter()
        .map(|p| {
            let modified = std::fs::metadata(&p)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, p)
        })
        .max()
        .map(|(_, p)| p)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn set_mtime(path: &Path, secs: u64) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    // ── load_document* ────────────────────────────────────────────────────────

    #[test]
    fn test_load_document_from_reader() {
        let doc = load_document(r#"{"shoe_one": {"total_steps": 3}}"#.as_bytes()).unwrap();
        assert_eq!(doc["shoe_one"]["total_steps"], 3);
    }

    #[test]
    fn test_load_document_empty_object() {
        let doc = load_document_from_slice(b"{}").unwrap();
        assert!(doc.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_load_document_malformed_is_parse_error() {
        let err = load_document_from_slice(b"{\"shoe_one\": ").unwrap_err();
        assert!(matches!(err, StrideError::JsonParse(_)));
    }

    #[test]
    fn test_load_document_empty_input_is_parse_error() {
        let err = load_document_from_slice(b"").unwrap_err();
        assert!(matches!(err, StrideError::JsonParse(_)));
    }

    #[test]
    fn test_load_document_from_path() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "run.json", r#"{"shoe_two": {}}"#);
        let doc = load_document_from_path(&path).unwrap();
        assert!(doc.get("shoe_two").is_some());
    }

    #[test]
    fn test_load_document_from_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = load_document_from_path(&dir.path().join("nope.json")).unwrap_err();
        match err {
            StrideError::FileRead { path, .. } => assert!(path.ends_with("nope.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    // ── resolve_upload ────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_upload_file_is_itself() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "run.json", "{}");
        assert_eq!(resolve_upload(&path).unwrap(), path);
    }

    #[test]
    fn test_resolve_upload_missing_path() {
        let err = resolve_upload(Path::new("/tmp/stride-dashboard-missing-xyz")).unwrap_err();
        assert!(matches!(err, StrideError::UploadNotFound(_)));
    }

    #[test]
    fn test_resolve_upload_empty_directory() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "notes.txt", "hello");
        let err = resolve_upload(dir.path()).unwrap_err();
        assert!(matches!(err, StrideError::NoDocument(_)));
    }

    #[test]
    fn test_resolve_upload_directory_picks_newest() {
        let dir = TempDir::new().unwrap();
        let old = write_file(dir.path(), "b-old.json", "{}");
        let new = write_file(dir.path(), "a-new.json", "{}");
        set_mtime(&old, 1_000);
        set_mtime(&new, 2_000);

        assert_eq!(resolve_upload(dir.path()).unwrap(), new);
    }

    // ── find_json_files ───────────────────────────────────────────────────────

    #[test]
    fn test_find_json_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("week-2");
        std::fs::create_dir_all(&sub).unwrap();
        write_file(dir.path(), "c.json", "{}");
        write_file(dir.path(), "a.JSON", "{}");
        write_file(&sub, "b.json", "{}");
        write_file(dir.path(), "skip.csv", "");

        let files = find_json_files(dir.path());
        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_find_json_files_nonexistent_path() {
        let files = find_json_files(Path::new("/tmp/does-not-exist-stride-test-xyz"));
        assert!(files.is_empty());
    }
}
