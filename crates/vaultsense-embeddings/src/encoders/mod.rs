//! Encoder implementations and provider selection.

pub mod hashing;
pub mod ollama;

pub use hashing::HashingEncoder;
pub use ollama::OllamaEncoder;

use tracing::{info, warn};

use vaultsense_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use vaultsense_core::IQueryEncoder;

use crate::cache::CachedEncoder;

/// Build the configured encoder, wrapped in a query cache.
///
/// An Ollama provider that fails its health check falls back to the
/// hashing encoder. A cache size of zero disables the cache.
pub fn create_encoder(config: &EmbeddingConfig) -> Box<dyn IQueryEncoder> {
    let encoder: Box<dyn IQueryEncoder> = match config.effective_provider() {
        EmbeddingProviderKind::Ollama => {
            let ollama = OllamaEncoder::from_config(config);
            if ollama.health_check() {
                info!(provider = "ollama", model = ollama.name(), "query encoder connected");
                Box::new(ollama)
            } else {
                warn!(
                    url = ollama.base_url(),
                    "ollama unavailable, falling back to hashing encoder"
                );
                Box::new(HashingEncoder::new(config.effective_dimensions()))
            }
        }
        EmbeddingProviderKind::Hashing => {
            info!(provider = "hashing", "using hashing query encoder");
            Box::new(HashingEncoder::new(config.effective_dimensions()))
        }
    };

    match config.effective_cache_size() {
        0 => encoder,
        capacity => Box::new(CachedEncoder::new(encoder, capacity)),
    }
}
