//! Process-wide collection handle with atomic reload.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use vaultsense_core::models::Collection;

use crate::loader::CollectionLoader;

/// What a reload replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadSummary {
    pub previous_len: usize,
    pub current_len: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Published {
    collection: Arc<Collection>,
    loaded_at: DateTime<Utc>,
}

/// Owns the live `Arc<Collection>`.
///
/// Readers take a clone of the `Arc` and keep using it for as long as they
/// like. A reload builds a complete new collection first and only then
/// swaps the pointer, so no reader ever sees a partially built one.
#[derive(Debug)]
pub struct SnapshotStore {
    loader: CollectionLoader,
    published: RwLock<Published>,
}

impl SnapshotStore {
    /// Load the vault at `root` and publish the result.
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self::with_loader(CollectionLoader::new(root.as_ref()))
    }

    pub fn with_loader(loader: CollectionLoader) -> Self {
        let collection = loader.load();
        Self {
            loader,
            published: RwLock::new(Published {
                collection: Arc::new(collection),
                loaded_at: Utc::now(),
            }),
        }
    }

    /// Publish an already-built collection (tests, embedding callers).
    pub fn from_collection(root: impl AsRef<Path>, collection: Collection) -> Self {
        Self {
            loader: CollectionLoader::new(root.as_ref()),
            published: RwLock::new(Published {
                collection: Arc::new(collection),
                loaded_at: Utc::now(),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        self.loader.root()
    }

    /// The live snapshot.
    pub fn current(&self) -> Arc<Collection> {
        self.read().collection.clone()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.read().loaded_at
    }

    /// Rebuild from disk and swap the new snapshot in.
    pub fn reload(&self) -> ReloadSummary {
        // Build outside the lock; only the swap is exclusive.
        let fresh = Published {
            collection: Arc::new(self.loader.load()),
            loaded_at: Utc::now(),
        };
        let current_len = fresh.collection.len();
        let loaded_at = fresh.loaded_at;

        let previous = {
            let mut guard = self
                .published
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, fresh)
        };

        info!(
            previous = previous.collection.len(),
            current = current_len,
            "collection snapshot replaced"
        );

        ReloadSummary {
            previous_len: previous.collection.len(),
            current_len,
            loaded_at,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Published> {
        // The guarded value is only ever replaced whole, so a poisoned
        // lock still holds a complete snapshot.
        self.published.read().unwrap_or_else(PoisonError::into_inner)
    }
}
