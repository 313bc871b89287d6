//! ErrorCode trait for rendering failures at the tool boundary.

/// Every error enum implements this to provide a stable code string,
/// so callers on the other side of the protocol can branch on it.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the plain-text rendering: `[ERROR_CODE] message`.
    fn display_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the tool boundary.
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INVALID_QUERY: &str = "INVALID_QUERY";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
pub const EMBEDDING_ERROR: &str = "EMBEDDING_ERROR";
pub const PROVIDER_UNAVAILABLE: &str = "PROVIDER_UNAVAILABLE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const NOTE_NOT_FOUND: &str = "NOTE_NOT_FOUND";
pub const PATH_OUTSIDE_VAULT: &str = "PATH_OUTSIDE_VAULT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
