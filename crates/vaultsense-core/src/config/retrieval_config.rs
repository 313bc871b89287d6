//! Ranking defaults.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Defaults applied when a caller omits ranking options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Result cap. Default: 10.
    pub default_limit: Option<usize>,
    /// Similarity floor. Default: 0.3.
    pub default_threshold: Option<f64>,
    /// Largest cap accepted at the tool boundary. Default: 100.
    pub max_limit: Option<usize>,
}

impl RetrievalConfig {
    pub fn effective_default_limit(&self) -> usize {
        self.default_limit.unwrap_or(constants::DEFAULT_LIMIT)
    }

    pub fn effective_default_threshold(&self) -> f64 {
        self.default_threshold.unwrap_or(constants::DEFAULT_THRESHOLD)
    }

    pub fn effective_max_limit(&self) -> usize {
        self.max_limit.unwrap_or(constants::DEFAULT_MAX_LIMIT)
    }
}
