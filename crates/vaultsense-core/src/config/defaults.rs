// Single source of truth for config default values that are not format constants.

// --- Embedding ---
pub const DEFAULT_PROVIDER: &str = "hashing";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "bge-micro-v2";
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
