//! Top-level error aggregating every subsystem error via `From` conversions.

use super::error_code::{self, ErrorCode};
use super::{ConfigError, EmbeddingError, StorageError};

/// Result alias used across the workspace.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors surfaced to callers of the ranking operations.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The reference path of a similar-entry lookup is not in the collection.
    #[error("entry not found: {path}")]
    EntryNotFound { path: String },

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for VaultError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EntryNotFound { .. } => error_code::NOT_FOUND,
            Self::InvalidQuery { .. } => error_code::INVALID_QUERY,
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::UnknownTool { .. } => error_code::UNKNOWN_TOOL,
            Self::Storage(e) => e.error_code(),
            Self::Embedding(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
