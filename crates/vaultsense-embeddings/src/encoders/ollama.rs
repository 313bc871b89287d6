//! Query encoder backed by a local Ollama server.
//!
//! Availability is gated by `health_check`; until it passes, `encode`
//! fails with `ProviderUnavailable` without touching the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::{Handle, Runtime};
use tracing::{debug, warn};

use vaultsense_core::config::EmbeddingConfig;
use vaultsense_core::errors::{EmbeddingError, VaultResult};
use vaultsense_core::IQueryEncoder;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaEncoder {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEncoder {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, dimensions: usize) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
            timeout: Duration::from_secs(30),
            available: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(
            config.effective_ollama_url(),
            config.effective_ollama_model(),
            config.effective_dimensions(),
        )
        .with_timeout(Duration::from_secs(config.effective_request_timeout_secs()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `/api/tags` and record whether the server answered.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = block_on_isolated(|rt| {
            rt.block_on(async {
                reqwest::Client::new()
                    .get(&url)
                    .timeout(HEALTH_TIMEOUT)
                    .send()
                    .await
                    .map(|resp| resp.status())
            })
        });

        let healthy = match result {
            Ok(Ok(status)) if status.is_success() => {
                debug!(model = %self.model, url = %self.base_url, "ollama health check passed");
                true
            }
            Ok(Ok(status)) => {
                warn!(%status, "ollama health check failed");
                false
            }
            Ok(Err(e)) => {
                warn!(error = %e, url = %self.base_url, "ollama unreachable");
                false
            }
            Err(e) => {
                warn!(error = %e, "ollama health check could not run");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    async fn post_embed(&self, text: &str) -> Result<EmbedResponse, EmbeddingError> {
        let url = format!("{}/api/embed", self.base_url);
        let request = EmbedRequest {
            model: &self.model,
            input: vec![text],
        };

        let response = reqwest::Client::new()
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("ollama HTTP error: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("ollama returned {status}: {body}"),
            });
        }

        response
            .json::<EmbedResponse>()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("ollama JSON parse error: {e}"),
            })
    }

    fn request_embedding(&self, text: &str) -> VaultResult<Vec<f32>> {
        let response = block_on_isolated(|rt| rt.block_on(self.post_embed(text)))??;

        let vector = response
            .embeddings
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or(EmbeddingError::EmptyVector)?;

        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        Ok(vector)
    }
}

fn runtime() -> Result<Runtime, EmbeddingError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("runtime error: {e}"),
        })
}

/// Run `task` on a private current-thread runtime.
///
/// Tokio refuses to block inside a runtime, so when the caller is already
/// on one the private runtime lives on a scoped worker thread instead.
fn block_on_isolated<T, F>(task: F) -> Result<T, EmbeddingError>
where
    F: FnOnce(&Runtime) -> T + Send,
    T: Send,
{
    if Handle::try_current().is_err() {
        return Ok(task(&runtime()?));
    }
    std::thread::scope(|scope| {
        scope
            .spawn(|| runtime().map(|rt| task(&rt)))
            .join()
            .map_err(|_| EmbeddingError::InferenceFailed {
                reason: "ollama worker thread panicked".to_string(),
            })?
    })
}

impl IQueryEncoder for OllamaEncoder {
    fn encode(&self, text: &str) -> VaultResult<Vec<f32>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }
        self.request_embedding(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
