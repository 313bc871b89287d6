//! Query encoder errors.

use super::error_code::{self, ErrorCode};

/// Errors raised by an `IQueryEncoder`.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("encoder returned an empty vector")]
    EmptyVector,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl ErrorCode for EmbeddingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable { .. } => error_code::PROVIDER_UNAVAILABLE,
            _ => error_code::EMBEDDING_ERROR,
        }
    }
}
