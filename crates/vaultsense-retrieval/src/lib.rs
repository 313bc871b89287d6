//! # vaultsense-retrieval
//!
//! Cosine ranking over an in-memory collection snapshot.
//!
//! ## Architecture
//!
//! ```text
//! ToolDispatcher (tool name + JSON args → ToolOutput)
//! └── RetrievalEngine (live SnapshotStore + IQueryEncoder)
//!     ├── search        filter → encode query → score → threshold → sort → take
//!     ├── find_similar  same pipeline, reference vector from the collection
//!     └── stats         per-kind counts, dimensions, model id
//! similarity::cosine_similarity (f64 accumulation, 3-decimal rounding)
//! ```

pub mod dispatch;
pub mod engine;
pub mod similarity;

pub use dispatch::{ToolDispatcher, ToolOutput, TOOL_NAMES};
pub use engine::{find_similar, search, stats, RetrievalEngine};
pub use similarity::{cosine_similarity, round_score, similarity_of};
