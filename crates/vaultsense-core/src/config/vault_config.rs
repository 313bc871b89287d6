//! Top-level vaultsense configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{EmbeddingConfig, EmbeddingProviderKind, ReaderConfig, RetrievalConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`VAULTSENSE_*`)
/// 3. Project config (`vaultsense.toml` in the vault root)
/// 4. User config (`~/.vaultsense/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VaultConfig {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub reader: ReaderConfig,
}

/// Override arguments supplied by whoever embeds the engine.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub default_limit: Option<usize>,
    pub default_threshold: Option<f64>,
    pub embedding_provider: Option<String>,
    pub reader_max_bytes: Option<usize>,
}

impl VaultConfig {
    /// Load configuration with layered resolution rooted at the vault `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal.
                        tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &VaultConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.retrieval.default_threshold {
            if !(-1.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "retrieval.default_threshold".to_string(),
                    message: "must be between -1.0 and 1.0".to_string(),
                });
            }
        }
        if config.retrieval.default_limit == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.default_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.retrieval.max_limit == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.max_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.retrieval.effective_default_limit() > config.retrieval.effective_max_limit() {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.default_limit".to_string(),
                message: "must not exceed retrieval.max_limit".to_string(),
            });
        }
        if let Some(ref provider) = config.embedding.provider {
            if let Err(message) = provider.parse::<EmbeddingProviderKind>() {
                return Err(ConfigError::ValidationFailed {
                    field: "embedding.provider".to_string(),
                    message,
                });
            }
        }
        if config.embedding.dimensions == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.dimensions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.reader.max_bytes == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "reader.max_bytes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.vaultsense/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(constants::USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VaultConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: VaultConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut VaultConfig, other: &VaultConfig) {
        // Retrieval
        if other.retrieval.default_limit.is_some() {
            base.retrieval.default_limit = other.retrieval.default_limit;
        }
        if other.retrieval.default_threshold.is_some() {
            base.retrieval.default_threshold = other.retrieval.default_threshold;
        }
        if other.retrieval.max_limit.is_some() {
            base.retrieval.max_limit = other.retrieval.max_limit;
        }

        // Embedding
        if other.embedding.provider.is_some() {
            base.embedding.provider = other.embedding.provider.clone();
        }
        if other.embedding.ollama_url.is_some() {
            base.embedding.ollama_url = other.embedding.ollama_url.clone();
        }
        if other.embedding.ollama_model.is_some() {
            base.embedding.ollama_model = other.embedding.ollama_model.clone();
        }
        if other.embedding.dimensions.is_some() {
            base.embedding.dimensions = other.embedding.dimensions;
        }
        if other.embedding.cache_size.is_some() {
            base.embedding.cache_size = other.embedding.cache_size;
        }
        if other.embedding.request_timeout_secs.is_some() {
            base.embedding.request_timeout_secs = other.embedding.request_timeout_secs;
        }

        // Reader
        if other.reader.max_bytes.is_some() {
            base.reader.max_bytes = other.reader.max_bytes;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VAULTSENSE_DEFAULT_LIMIT`, `VAULTSENSE_EMBEDDING_PROVIDER`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut VaultConfig) {
        if let Ok(val) = std::env::var("VAULTSENSE_DEFAULT_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.retrieval.default_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VAULTSENSE_DEFAULT_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.retrieval.default_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VAULTSENSE_MAX_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.retrieval.max_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VAULTSENSE_EMBEDDING_PROVIDER") {
            config.embedding.provider = Some(val);
        }
        if let Ok(val) = std::env::var("VAULTSENSE_OLLAMA_URL") {
            config.embedding.ollama_url = Some(val);
        }
        if let Ok(val) = std::env::var("VAULTSENSE_OLLAMA_MODEL") {
            config.embedding.ollama_model = Some(val);
        }
        if let Ok(val) = std::env::var("VAULTSENSE_READER_MAX_BYTES") {
            if let Ok(v) = val.parse::<usize>() {
                config.reader.max_bytes = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut VaultConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.default_limit {
            config.retrieval.default_limit = Some(v);
        }
        if let Some(v) = overrides.default_threshold {
            config.retrieval.default_threshold = Some(v);
        }
        if let Some(ref v) = overrides.embedding_provider {
            config.embedding.provider = Some(v.clone());
        }
        if let Some(v) = overrides.reader_max_bytes {
            config.reader.max_bytes = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
