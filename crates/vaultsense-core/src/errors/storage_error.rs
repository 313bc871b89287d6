//! Storage errors. Only the note reader surfaces these; the collection
//! loader degrades every storage failure to "no data".

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur while reading vault files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("note not found: {path}")]
    NoteNotFound { path: String },

    #[error("path escapes the vault root: {path}")]
    PathOutsideVault { path: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoteNotFound { .. } => error_code::NOTE_NOT_FOUND,
            Self::PathOutsideVault { .. } => error_code::PATH_OUTSIDE_VAULT,
            Self::Io { .. } => error_code::STORAGE_ERROR,
        }
    }
}
