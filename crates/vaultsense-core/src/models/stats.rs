use serde::{Deserialize, Serialize};

/// Summary of a loaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub document_count: usize,
    pub section_count: usize,
    /// Vector length of the first entry in path order; `0` when empty.
    pub dimensions: usize,
    pub model_id: String,
}
