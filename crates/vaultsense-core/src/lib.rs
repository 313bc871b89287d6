//! # vaultsense-core
//!
//! Foundation crate for the vaultsense ranking engine.
//! Defines the data model, traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::VaultConfig;
pub use errors::{VaultError, VaultResult};
pub use models::{
    Collection, CollectionEntry, CollectionStats, EmbeddingRecord, RecordKind, SearchHit,
    SearchOptions, SimilarOptions,
};
pub use traits::IQueryEncoder;
