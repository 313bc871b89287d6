//! Configuration system for vaultsense.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod defaults;
pub mod embedding_config;
pub mod reader_config;
pub mod retrieval_config;
pub mod vault_config;

pub use embedding_config::{EmbeddingConfig, EmbeddingProviderKind};
pub use reader_config::ReaderConfig;
pub use retrieval_config::RetrievalConfig;
pub use vault_config::{ConfigOverrides, VaultConfig};
