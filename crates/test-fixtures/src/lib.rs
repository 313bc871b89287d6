//! Vault fixtures for vaultsense tests.
//!
//! Two flavours: the checked-in vaults under `test-fixtures/vaults/`, and
//! throwaway vaults written into a temp directory with [`TempVault`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

use vaultsense_core::constants;
use vaultsense_core::errors::{EmbeddingError, VaultResult};
use vaultsense_core::{Collection, EmbeddingRecord, IQueryEncoder, RecordKind};

/// Root directory of the test-fixtures crate.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Absolute path of a checked-in fixture vault, e.g. `fixture_vault("basic")`.
///
/// # Panics
/// Panics if the vault doesn't exist.
pub fn fixture_vault(name: &str) -> PathBuf {
    let path = fixtures_root().join("vaults").join(name);
    assert!(path.is_dir(), "fixture vault missing: {}", path.display());
    path
}

/// One record-file line in the on-disk format, with a trailing comma.
pub fn record_line(kind: RecordKind, path: &str, vector: &[f32]) -> String {
    let key = format!("{}{}", kind.key_prefix(), path);
    let advisory_path = match kind {
        RecordKind::Document => json!(path),
        RecordKind::Section => serde_json::Value::Null,
    };
    let value = json!({
        "path": advisory_path,
        "embeddings": { (constants::MODEL_ID): { "vec": vector } },
    });
    format!("{}: {},", json!(key), value)
}

/// A line whose value object has `embeddings` but no `vec`.
pub fn record_line_without_vector(kind: RecordKind, path: &str) -> String {
    let key = format!("{}{}", kind.key_prefix(), path);
    let value = json!({
        "path": path,
        "embeddings": { (constants::MODEL_ID): { "tokens": 12 } },
    });
    format!("{}: {},", json!(key), value)
}

/// Four 3-d documents: `alpha` [1,0,0], `beta` [0,1,0], `gamma` [1,1,0],
/// `delta` [-1,0,0].
pub fn sample_records() -> Vec<EmbeddingRecord> {
    vec![
        EmbeddingRecord::new("alpha", vec![1.0, 0.0, 0.0], RecordKind::Document),
        EmbeddingRecord::new("beta", vec![0.0, 1.0, 0.0], RecordKind::Document),
        EmbeddingRecord::new("gamma", vec![1.0, 1.0, 0.0], RecordKind::Document),
        EmbeddingRecord::new("delta", vec![-1.0, 0.0, 0.0], RecordKind::Document),
    ]
}

pub fn sample_collection() -> Collection {
    sample_records().into_iter().collect()
}

/// A mixed collection of documents and sections under two folders.
pub fn mixed_collection() -> Collection {
    vec![
        EmbeddingRecord::new("Projects/plan.md", vec![1.0, 0.0, 0.0], RecordKind::Document),
        EmbeddingRecord::new(
            "Projects/plan.md#Goals",
            vec![0.9, 0.1, 0.0],
            RecordKind::Section,
        ),
        EmbeddingRecord::new(
            "Projects/plan.md#Risks",
            vec![0.7, 0.7, 0.0],
            RecordKind::Section,
        ),
        EmbeddingRecord::new("journal/today.md", vec![0.8, 0.2, 0.0], RecordKind::Document),
        EmbeddingRecord::new(
            "journal/today.md#Mood",
            vec![0.0, 1.0, 0.0],
            RecordKind::Section,
        ),
        EmbeddingRecord::new("projects-archive.md", vec![1.0, 0.05, 0.0], RecordKind::Document),
    ]
    .into_iter()
    .collect()
}

/// A vault in a temp directory, deleted on drop.
pub struct TempVault {
    dir: TempDir,
}

impl TempVault {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp vault"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn record_dir(&self) -> PathBuf {
        self.root()
            .join(constants::ENV_DIR)
            .join(constants::RECORD_DIR)
    }

    /// Write raw text as a record file named `file_name`.
    pub fn write_raw(&self, file_name: &str, text: &str) -> PathBuf {
        let dir = self.record_dir();
        std::fs::create_dir_all(&dir).expect("create record dir");
        let path = dir.join(file_name);
        std::fs::write(&path, text).expect("write record file");
        path
    }

    /// Write `records` as a record file, one line each.
    pub fn write_records(&self, file_name: &str, records: &[EmbeddingRecord]) -> PathBuf {
        let text: Vec<String> = records
            .iter()
            .map(|r| record_line(r.kind, &r.path, &r.vector))
            .collect();
        self.write_raw(file_name, &text.join("\n"))
    }

    /// Write a note at a vault-relative path.
    pub fn write_note(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create note dir");
        }
        std::fs::write(&path, content).expect("write note");
        path
    }
}

impl Default for TempVault {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoder that returns canned vectors for known queries.
pub struct FixedEncoder {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

impl FixedEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimensions,
        }
    }

    pub fn with(mut self, query: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(query.to_string(), vector);
        self
    }
}

impl IQueryEncoder for FixedEncoder {
    fn encode(&self, text: &str) -> VaultResult<Vec<f32>> {
        self.vectors.get(text).cloned().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: format!("no canned vector for {text:?}"),
            }
            .into()
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Encoder that always fails as if its backend were down.
pub struct FailingEncoder;

impl IQueryEncoder for FailingEncoder {
    fn encode(&self, _text: &str) -> VaultResult<Vec<f32>> {
        Err(EmbeddingError::ProviderUnavailable {
            provider: "failing".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        false
    }
}
