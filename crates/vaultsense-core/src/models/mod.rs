//! Data model shared by the parser, loader, and ranking operations.

pub mod collection;
pub mod record;
pub mod search;
pub mod stats;

pub use collection::{Collection, CollectionEntry};
pub use record::{EmbeddingRecord, RecordKind};
pub use search::{SearchHit, SearchOptions, SimilarOptions};
pub use stats::CollectionStats;
