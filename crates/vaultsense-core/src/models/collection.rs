//! The in-memory collection of embeddings, keyed by path.

use std::collections::BTreeMap;

use super::record::{EmbeddingRecord, RecordKind};

/// A stored vector and its kind. Exposes no mutable access.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    vector: Vec<f32>,
    kind: RecordKind,
}

impl CollectionEntry {
    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }
}

/// Mapping from path to `{vector, kind}`.
///
/// Backed by a `BTreeMap` so iteration is ordered by path: any
/// "first entry" or tie-break is reproducible across runs and platforms.
/// Built once, then shared read-only (see `SnapshotStore`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    entries: BTreeMap<String, CollectionEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing entry for the same path.
    ///
    /// Records with an empty vector are dropped. Returns `true` if an
    /// existing entry was overwritten.
    pub fn insert(&mut self, record: EmbeddingRecord) -> bool {
        if record.vector.is_empty() {
            return false;
        }
        self.entries
            .insert(
                record.path,
                CollectionEntry {
                    vector: record.vector,
                    kind: record.kind,
                },
            )
            .is_some()
    }

    pub fn get(&self, path: &str) -> Option<&CollectionEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Number of entries of the given kind.
    pub fn count_kind(&self, kind: RecordKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }
}

impl Extend<EmbeddingRecord> for Collection {
    fn extend<I: IntoIterator<Item = EmbeddingRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<EmbeddingRecord> for Collection {
    fn from_iter<I: IntoIterator<Item = EmbeddingRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}
