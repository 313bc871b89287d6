//! Query encoder configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Which encoder turns query text into a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    /// Local Ollama server.
    Ollama,
    /// Deterministic hashed bag-of-words, always available.
    Hashing,
}

impl EmbeddingProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Hashing => "hashing",
        }
    }
}

impl fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "hashing" | "hash" => Ok(Self::Hashing),
            other => Err(format!("unknown embedding provider: {other}")),
        }
    }
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider: "ollama" | "hashing". Default: "hashing".
    pub provider: Option<String>,
    /// Ollama base URL. Default: "http://localhost:11434".
    pub ollama_url: Option<String>,
    /// Ollama model name. Default: "bge-micro-v2".
    pub ollama_model: Option<String>,
    /// Query vector dimensions. Default: 384.
    pub dimensions: Option<usize>,
    /// Query vector cache capacity (entries). Default: 1000.
    pub cache_size: Option<u64>,
    /// HTTP request timeout in seconds. Default: 30.
    pub request_timeout_secs: Option<u64>,
}

impl EmbeddingConfig {
    /// Returns the configured provider, falling back to hashing when unset
    /// or unrecognised (`validate` rejects unrecognised names at load time).
    pub fn effective_provider(&self) -> EmbeddingProviderKind {
        self.provider
            .as_deref()
            .unwrap_or(defaults::DEFAULT_PROVIDER)
            .parse()
            .unwrap_or(EmbeddingProviderKind::Hashing)
    }

    pub fn effective_ollama_url(&self) -> String {
        self.ollama_url
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_OLLAMA_URL.to_string())
    }

    pub fn effective_ollama_model(&self) -> String {
        self.ollama_model
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_OLLAMA_MODEL.to_string())
    }

    pub fn effective_dimensions(&self) -> usize {
        self.dimensions.unwrap_or(constants::MODEL_DIMENSIONS)
    }

    pub fn effective_cache_size(&self) -> u64 {
        self.cache_size.unwrap_or(defaults::DEFAULT_QUERY_CACHE_SIZE)
    }

    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(defaults::DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}
