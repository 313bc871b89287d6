//! Error handling for vaultsense.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod embedding_error;
pub mod error_code;
pub mod storage_error;
pub mod vault_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use error_code::ErrorCode;
pub use storage_error::StorageError;
pub use vault_error::{VaultError, VaultResult};
