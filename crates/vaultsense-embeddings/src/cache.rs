//! In-memory query vector cache using moka.
//!
//! Keys are blake3 hashes of the query text. Only successful encodings are
//! stored; similarity scores are never cached.

use std::time::Duration;

use moka::sync::Cache;
use tracing::trace;

use vaultsense_core::errors::VaultResult;
use vaultsense_core::IQueryEncoder;

pub struct CachedEncoder<E> {
    inner: E,
    cache: Cache<String, Vec<f32>>,
}

impl<E: IQueryEncoder> CachedEncoder<E> {
    pub fn new(inner: E, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { inner, cache }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Entries currently cached. moka updates this lazily.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }
}

impl<E: IQueryEncoder> IQueryEncoder for CachedEncoder<E> {
    fn encode(&self, text: &str) -> VaultResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            trace!("query cache hit");
            return Ok(hit);
        }
        let vector = self.inner.encode(text)?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use vaultsense_core::errors::EmbeddingError;

    /// Counts calls; fails on "fail".
    struct Counting {
        calls: AtomicUsize,
    }

    impl IQueryEncoder for Counting {
        fn encode(&self, text: &str) -> VaultResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text == "fail" {
                return Err(EmbeddingError::InferenceFailed {
                    reason: "boom".into(),
                }
                .into());
            }
            Ok(vec![text.len() as f32])
        }
        fn dimensions(&self) -> usize {
            1
        }
        fn name(&self) -> &str {
            "counting"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn counting() -> CachedEncoder<Counting> {
        CachedEncoder::new(
            Counting {
                calls: AtomicUsize::new(0),
            },
            16,
        )
    }

    #[test]
    fn repeated_query_hits_cache() {
        let enc = counting();
        assert_eq!(enc.encode("abc").unwrap(), vec![3.0]);
        assert_eq!(enc.encode("abc").unwrap(), vec![3.0]);
        assert_eq!(enc.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(enc.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let enc = counting();
        assert!(enc.encode("fail").is_err());
        assert!(enc.encode("fail").is_err());
        assert_eq!(enc.inner().calls.load(Ordering::SeqCst), 2);
        assert!(enc.is_empty());
    }

    #[test]
    fn clear_forces_reencode() {
        let enc = counting();
        enc.encode("x").unwrap();
        enc.clear();
        enc.encode("x").unwrap();
        assert_eq!(enc.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn delegates_metadata() {
        let enc = counting();
        assert_eq!(enc.name(), "counting");
        assert_eq!(enc.dimensions(), 1);
        assert!(enc.is_available());
    }
}
