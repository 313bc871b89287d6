//! Ranking over a collection snapshot.
//!
//! The free functions are pure: they take the collection by reference and
//! never mutate it. `RetrievalEngine` binds them to a live `SnapshotStore`
//! and a query encoder.

use std::cmp::Ordering;

use tracing::debug;

use vaultsense_core::constants;
use vaultsense_core::errors::{EmbeddingError, VaultError, VaultResult};
use vaultsense_core::{
    Collection, CollectionStats, IQueryEncoder, RecordKind, SearchHit, SearchOptions,
    SimilarOptions,
};
use vaultsense_storage::{ReloadSummary, SnapshotStore};

use crate::similarity::cosine_similarity;

/// Rank entries by similarity to a free-text query.
///
/// The query is encoded once; encoder failures propagate unchanged. A
/// query that encodes to the zero vector is rejected as invalid.
/// Kind and path-prefix filters run before any vector arithmetic.
pub fn search(
    query: &str,
    collection: &Collection,
    encoder: &dyn IQueryEncoder,
    options: &SearchOptions,
) -> VaultResult<Vec<SearchHit>> {
    if query.trim().is_empty() {
        return Err(VaultError::InvalidQuery {
            reason: "query is empty".to_string(),
        });
    }

    let query_vector = encoder.encode(query)?;
    if query_vector.is_empty() {
        return Err(EmbeddingError::EmptyVector.into());
    }
    // A zero vector scores 0 against everything, so it cannot rank.
    if query_vector.iter().all(|x| *x == 0.0) {
        return Err(VaultError::InvalidQuery {
            reason: "query has no encodable terms".to_string(),
        });
    }

    let candidates = collection
        .iter()
        .filter(|(path, entry)| options.admits(path, entry.kind()))
        .map(|(path, entry)| (path, entry.vector()));

    let hits = rank(
        candidates,
        &query_vector,
        options.effective_threshold(),
        options.effective_limit(),
    );
    debug!(hits = hits.len(), encoder = encoder.name(), "query search");
    Ok(hits)
}

/// Rank entries by similarity to the entry stored at `path`.
///
/// `path` itself never appears in the result. Fails with
/// `EntryNotFound` when `path` is not in the collection.
pub fn find_similar(
    path: &str,
    collection: &Collection,
    options: &SimilarOptions,
) -> VaultResult<Vec<SearchHit>> {
    let reference = collection
        .get(path)
        .ok_or_else(|| VaultError::EntryNotFound {
            path: path.to_string(),
        })?;

    let candidates = collection
        .iter()
        .filter(|(other, entry)| *other != path && options.admits(entry.kind()))
        .map(|(other, entry)| (other, entry.vector()));

    Ok(rank(
        candidates,
        reference.vector(),
        options.effective_threshold(),
        options.effective_limit(),
    ))
}

/// Counts per kind, the first entry's dimensionality, and the model id.
pub fn stats(collection: &Collection) -> CollectionStats {
    let mut document_count = 0;
    let mut section_count = 0;
    let mut dimensions = None;

    for (_, entry) in collection.iter() {
        match entry.kind() {
            RecordKind::Document => document_count += 1,
            RecordKind::Section => section_count += 1,
        }
        if dimensions.is_none() {
            dimensions = Some(entry.vector().len());
        }
    }

    CollectionStats {
        document_count,
        section_count,
        dimensions: dimensions.unwrap_or(0),
        model_id: constants::MODEL_ID.to_string(),
    }
}

/// Score, keep scores >= `threshold`, order by score descending then path
/// ascending, cap at `limit`.
fn rank<'a>(
    candidates: impl Iterator<Item = (&'a str, &'a [f32])>,
    target: &[f32],
    threshold: f64,
    limit: usize,
) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = candidates
        .filter_map(|(path, vector)| {
            let score = cosine_similarity(target, vector);
            (score >= threshold).then(|| SearchHit {
                path: path.to_string(),
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.path.cmp(&b.path))
    });
    hits.truncate(limit);
    hits
}

/// The ranking operations bound to a live snapshot and an encoder.
pub struct RetrievalEngine {
    store: SnapshotStore,
    encoder: Box<dyn IQueryEncoder>,
}

impl RetrievalEngine {
    pub fn new(store: SnapshotStore, encoder: Box<dyn IQueryEncoder>) -> Self {
        Self { store, encoder }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn encoder(&self) -> &dyn IQueryEncoder {
        self.encoder.as_ref()
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> VaultResult<Vec<SearchHit>> {
        let snapshot = self.store.current();
        search(query, &snapshot, self.encoder.as_ref(), options)
    }

    pub fn find_similar(
        &self,
        path: &str,
        options: &SimilarOptions,
    ) -> VaultResult<Vec<SearchHit>> {
        let snapshot = self.store.current();
        find_similar(path, &snapshot, options)
    }

    pub fn stats(&self) -> CollectionStats {
        stats(&self.store.current())
    }

    pub fn reload(&self) -> ReloadSummary {
        self.store.reload()
    }
}
