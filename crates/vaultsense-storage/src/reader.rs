//! Reads note text for display, confined to the vault root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use vaultsense_core::errors::StorageError;
use vaultsense_core::models::record::document_path;

/// Text of a note, possibly truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContent {
    /// The vault-relative document path that was read.
    pub path: String,
    pub content: String,
    pub truncated: bool,
    /// Size of the file on disk.
    pub total_bytes: usize,
}

/// Read `relative` (a document or section path) under `root`.
///
/// Absolute paths and paths resolving outside the canonical root are
/// rejected. A file longer than `max_bytes` is cut at the last UTF-8
/// boundary at or before `max_bytes` bytes, then decoded lossily.
pub fn read_note(
    root: &Path,
    relative: &str,
    max_bytes: usize,
) -> Result<NoteContent, StorageError> {
    let doc = document_path(relative).trim();
    if doc.is_empty() {
        return Err(StorageError::NoteNotFound {
            path: relative.to_string(),
        });
    }

    let rel = Path::new(doc);
    if rel
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
    {
        return Err(StorageError::PathOutsideVault {
            path: doc.to_string(),
        });
    }

    let canonical_root = canonicalize(root)?;
    let resolved = match fs::canonicalize(canonical_root.join(rel)) {
        Ok(p) => p,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StorageError::NoteNotFound {
                path: doc.to_string(),
            })
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: canonical_root.join(rel),
                source,
            })
        }
    };

    // Catches `..` escapes and symlinks pointing out of the vault.
    if !resolved.starts_with(&canonical_root) {
        debug!(path = doc, "rejected note path outside vault");
        return Err(StorageError::PathOutsideVault {
            path: doc.to_string(),
        });
    }
    if !resolved.is_file() {
        return Err(StorageError::NoteNotFound {
            path: doc.to_string(),
        });
    }

    let bytes = fs::read(&resolved).map_err(|source| StorageError::Io {
        path: resolved.clone(),
        source,
    })?;
    let total_bytes = bytes.len();
    let truncated = total_bytes > max_bytes;
    let kept = if truncated {
        &bytes[..utf8_floor(&bytes, max_bytes)]
    } else {
        &bytes[..]
    };
    let content = String::from_utf8_lossy(kept).into_owned();

    Ok(NoteContent {
        path: doc.to_string(),
        content,
        truncated,
        total_bytes,
    })
}

/// Largest cut `<= at` that does not split a UTF-8 sequence. Looks back at
/// most three continuation bytes, the longest tail a sequence can have.
fn utf8_floor(bytes: &[u8], at: usize) -> usize {
    let floor = at.saturating_sub(3);
    let mut cut = at;
    while cut > floor && bytes.get(cut).is_some_and(|b| b & 0xC0 == 0x80) {
        cut -= 1;
    }
    cut
}

fn canonicalize(path: &Path) -> Result<PathBuf, StorageError> {
    fs::canonicalize(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
