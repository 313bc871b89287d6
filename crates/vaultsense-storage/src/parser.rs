//! Tolerant parser for `.ajson` record files.
//!
//! Each non-blank line has the shape
//!
//! ```text
//! "<prefix><path>": {"path": ..., "embeddings": {"<model>": {"vec": [..]}}},
//! ```
//!
//! Files are appended to incrementally, so a line may be truncated or
//! otherwise malformed. Every failure degrades to "skip this line".

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use vaultsense_core::constants;
use vaultsense_core::models::{EmbeddingRecord, RecordKind};

/// Parser bound to the model identifier whose vectors it extracts.
#[derive(Debug, Clone)]
pub struct RecordParser {
    model_id: String,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(constants::MODEL_ID)
    }
}

impl RecordParser {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Parse one line into zero or one record.
    pub fn parse_line(&self, line: &str) -> Option<EmbeddingRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let line = line.strip_suffix(',').unwrap_or(line);

        // The line is a bare `"key": value` pair; wrap it into an object.
        let wrapped = format!("{{{line}}}");
        let LinePairs(pairs) = serde_json::from_str::<LinePairs>(&wrapped).ok()?;

        // More than one pair on a line, even a repeated key, is not a
        // record this format writes.
        let [(key, value)]: [(String, Value); 1] = pairs.try_into().ok()?;

        let (kind, path) = RecordKind::split_key(&key)?;
        let vector = self.extract_vector(&value)?;

        Some(EmbeddingRecord::new(path, vector, kind))
    }

    /// Parse every line of a file, preserving line order.
    pub fn parse_records(&self, text: &str) -> Vec<EmbeddingRecord> {
        text.lines().filter_map(|line| self.parse_line(line)).collect()
    }

    /// `value.embeddings[<model>].vec`, only if it is a non-empty array of
    /// finite numbers.
    fn extract_vector(&self, value: &Value) -> Option<Vec<f32>> {
        let items = value
            .get("embeddings")?
            .get(self.model_id.as_str())?
            .get("vec")?
            .as_array()?;
        if items.is_empty() {
            return None;
        }

        items
            .iter()
            .map(|item| {
                let x = item.as_f64()? as f32;
                x.is_finite().then_some(x)
            })
            .collect()
    }
}

/// Every key/value pair of an object in document order. Unlike
/// `serde_json::Map`, repeated keys are kept rather than merged.
struct LinePairs(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for LinePairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = LinePairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LinePairs, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(1));
                while let Some(pair) = map.next_entry::<String, Value>()? {
                    pairs.push(pair);
                }
                Ok(LinePairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Parse one line using the default model identifier.
pub fn parse_line(line: &str) -> Option<EmbeddingRecord> {
    RecordParser::default().parse_line(line)
}

/// Parse a whole file using the default model identifier.
pub fn parse_records(text: &str) -> Vec<EmbeddingRecord> {
    RecordParser::default().parse_records(text)
}
