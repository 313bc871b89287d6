//! # vaultsense-storage
//!
//! Everything that touches the vault on disk.
//!
//! ## Architecture
//!
//! ```text
//! SnapshotStore (atomic publish of Arc<Collection>)
//! └── CollectionLoader (.smart-env/multi/*.ajson, sorted, last write wins)
//!     └── parser (one line -> zero or one EmbeddingRecord, never fails)
//! reader (note text for display, root containment + truncation)
//! ```

pub mod loader;
pub mod parser;
pub mod reader;
pub mod snapshot;

pub use loader::{load_collection, CollectionLoader, LoadReport};
pub use parser::{parse_line, parse_records, RecordParser};
pub use reader::{read_note, NoteContent};
pub use snapshot::{ReloadSummary, SnapshotStore};
