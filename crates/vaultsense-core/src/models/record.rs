use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Whether a record embeds a whole document or one section of it.
///
/// Decided by the key prefix in the record file, never by the path contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Document,
    Section,
}

impl RecordKind {
    /// All kinds, in the order their prefixes are tried.
    pub const ALL: [RecordKind; 2] = [RecordKind::Document, RecordKind::Section];

    /// The literal key prefix marking this kind in a record file.
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Document => constants::DOCUMENT_PREFIX,
            Self::Section => constants::SECTION_PREFIX,
        }
    }

    /// Split a record key into its kind and path.
    /// Returns `None` for unrecognised prefixes and for an empty path.
    pub fn split_key(key: &str) -> Option<(RecordKind, &str)> {
        Self::ALL.iter().find_map(|kind| {
            key.strip_prefix(kind.key_prefix())
                .filter(|path| !path.is_empty())
                .map(|path| (*kind, path))
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Section => "Section",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    /// Accepts the kind names plus the record-file vocabulary
    /// ("sources"/"blocks"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "documents" | "source" | "sources" | "smart_sources" => {
                Ok(Self::Document)
            }
            "section" | "sections" | "block" | "blocks" | "smart_blocks" => Ok(Self::Section),
            other => Err(format!("unknown record type: {other}")),
        }
    }
}

/// One embedding as yielded by the record parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Unique key. Section paths carry `#<section>` after the document path.
    pub path: String,
    pub vector: Vec<f32>,
    pub kind: RecordKind,
}

impl EmbeddingRecord {
    pub fn new(path: impl Into<String>, vector: Vec<f32>, kind: RecordKind) -> Self {
        Self {
            path: path.into(),
            vector,
            kind,
        }
    }

    /// The document part of the path (everything before the first `#`).
    pub fn document_path(&self) -> &str {
        document_path(&self.path)
    }
}

/// Strip the section fragment from a record path.
pub fn document_path(path: &str) -> &str {
    path.split_once(constants::FRAGMENT_DELIMITER)
        .map_or(path, |(doc, _)| doc)
}
