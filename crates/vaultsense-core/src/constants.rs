//! Shared constants for the vaultsense ranking engine.

/// vaultsense version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Record file layout ----

/// Directory under the vault root that holds the plugin environment.
pub const ENV_DIR: &str = ".smart-env";

/// Subdirectory of [`ENV_DIR`] holding the record files.
pub const RECORD_DIR: &str = "multi";

/// Extension (without the dot) of record files.
pub const RECORD_EXTENSION: &str = "ajson";

/// Key prefix of whole-document records.
pub const DOCUMENT_PREFIX: &str = "smart_sources:";

/// Key prefix of sub-document (section) records.
pub const SECTION_PREFIX: &str = "smart_blocks:";

/// Separates the document path from the section identifier in a section path.
pub const FRAGMENT_DELIMITER: char = '#';

/// Model identifier the stored vectors are keyed under.
pub const MODEL_ID: &str = "TaylorAI/bge-micro-v2";

/// Dimensionality produced by [`MODEL_ID`].
pub const MODEL_DIMENSIONS: usize = 384;

// ---- Ranking ----

/// Result cap when the caller does not supply one.
pub const DEFAULT_LIMIT: usize = 10;

/// Similarity floor when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Largest result cap accepted at the tool boundary.
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// Number of decimal places similarity scores are rounded to.
pub const SCORE_DECIMALS: i32 = 3;

// ---- Note reader ----

/// Maximum number of bytes of a note returned for display.
pub const DEFAULT_MAX_NOTE_BYTES: usize = 50_000;

// ---- Configuration ----

/// Project-level config file name, looked up in the vault root.
pub const PROJECT_CONFIG_FILE: &str = "vaultsense.toml";

/// User-level config directory name, under the home directory.
pub const USER_CONFIG_DIR: &str = ".vaultsense";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "VAULTSENSE_LOG";
