//! Ranking options and results.

use serde::{Deserialize, Serialize};

use super::record::RecordKind;
use crate::constants;

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub path: String,
    /// Cosine similarity rounded to three decimals.
    pub score: f64,
}

/// Options for query search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Result cap. `0` means "use the default".
    pub limit: usize,
    /// Minimum score (inclusive).
    pub threshold: f64,
    pub kind: Option<RecordKind>,
    /// Case-insensitive path prefix. Empty means no filter.
    pub path_prefix: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: constants::DEFAULT_LIMIT,
            threshold: constants::DEFAULT_THRESHOLD,
            kind: None,
            path_prefix: None,
        }
    }
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    pub fn effective_limit(&self) -> usize {
        effective_limit(self.limit)
    }

    pub fn effective_threshold(&self) -> f64 {
        effective_threshold(self.threshold)
    }

    /// Cheap pre-filter applied before any vector arithmetic.
    pub fn admits(&self, path: &str, kind: RecordKind) -> bool {
        if self.kind.is_some_and(|k| k != kind) {
            return false;
        }
        match self.path_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => starts_with_ignore_case(path, prefix),
            _ => true,
        }
    }
}

/// Options for similar-entry lookup. No path filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarOptions {
    /// Result cap. `0` means "use the default".
    pub limit: usize,
    /// Minimum score (inclusive).
    pub threshold: f64,
    pub kind: Option<RecordKind>,
}

impl Default for SimilarOptions {
    fn default() -> Self {
        Self {
            limit: constants::DEFAULT_LIMIT,
            threshold: constants::DEFAULT_THRESHOLD,
            kind: None,
        }
    }
}

impl SimilarOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn effective_limit(&self) -> usize {
        effective_limit(self.limit)
    }

    pub fn effective_threshold(&self) -> f64 {
        effective_threshold(self.threshold)
    }

    pub fn admits(&self, kind: RecordKind) -> bool {
        self.kind.map_or(true, |k| k == kind)
    }
}

/// A zero limit falls back to the default cap.
fn effective_limit(limit: usize) -> usize {
    if limit == 0 {
        constants::DEFAULT_LIMIT
    } else {
        limit
    }
}

/// Non-finite thresholds fall back to the default; finite ones are
/// clamped into the cosine range.
fn effective_threshold(threshold: f64) -> f64 {
    if threshold.is_finite() {
        threshold.clamp(-1.0, 1.0)
    } else {
        constants::DEFAULT_THRESHOLD
    }
}

/// Unicode-aware case-insensitive prefix test without allocating.
pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| hay.next() == Some(p))
}
