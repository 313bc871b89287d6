//! Note reader configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the note reader.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum bytes returned per note. Default: 50_000.
    pub max_bytes: Option<usize>,
}

impl ReaderConfig {
    pub fn effective_max_bytes(&self) -> usize {
        self.max_bytes.unwrap_or(constants::DEFAULT_MAX_NOTE_BYTES)
    }
}
