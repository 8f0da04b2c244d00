//! Storage layer: the JSON-backed tag store and the persisted folder config.
//!
//! Both documents are small and rewritten in full on every mutation.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub mod settings_file;
pub mod tags;

pub use settings_file::FolderConfig;
pub use tags::{RemoveOutcome, TagStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Splits user input on whitespace, dropping repeats but keeping first-seen order.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tok in input.split_whitespace() {
        if !out.iter().any(|t| t == tok) {
            out.push(tok.to_string());
        }
    }
    out
}

/// Serializes `value` as pretty JSON and swaps it into place via a sibling temp file.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Reads a file to a string, treating any failure as absent.
pub(crate) fn read_soft(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} does not exist yet", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("could not read {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_and_dedupes() {
        assert_eq!(tokenize("  x x\ty \n"), vec!["x", "y"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn write_json_creates_parent_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("doc.json");
        write_json(&target, &vec!["a"]).unwrap();
        assert!(target.exists());
        assert!(!dir.path().join("nested").join("doc.json.tmp").exists());
    }
}
