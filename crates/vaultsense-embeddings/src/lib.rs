//! # vaultsense-embeddings
//!
//! Turns query text into vectors comparable with the stored embeddings.
//!
//! ## Architecture
//!
//! ```text
//! create_encoder(&EmbeddingConfig)
//! └── CachedEncoder (moka, keyed by blake3 of the query)
//!     ├── OllamaEncoder (local server, health-checked)
//!     └── HashingEncoder (offline fallback, always available)
//! ```

pub mod cache;
pub mod encoders;

pub use cache::CachedEncoder;
pub use encoders::{create_encoder, HashingEncoder, OllamaEncoder};
