//! Builds a `Collection` from the record files of a vault.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use vaultsense_core::constants;
use vaultsense_core::models::Collection;

use crate::parser::RecordParser;

/// Counters describing one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Record files found in the record directory.
    pub files_found: usize,
    /// Files that could not be read and were skipped.
    pub files_skipped: usize,
    /// Records parsed across all files, before deduplication.
    pub records_parsed: usize,
    /// Records that replaced an earlier record for the same path.
    pub records_overwritten: usize,
}

/// Loads `.smart-env/multi/*.ajson` under a vault root.
///
/// Files are processed in lexicographic file-name order, so when two files
/// define the same path the one whose name sorts last wins on every
/// platform. Loading never fails: a missing directory or unreadable file
/// only means less data.
#[derive(Debug, Clone)]
pub struct CollectionLoader {
    root: PathBuf,
    parser: RecordParser,
}

impl CollectionLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: RecordParser::default(),
        }
    }

    /// Use a model identifier other than the default.
    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the record files.
    pub fn record_dir(&self) -> PathBuf {
        record_dir(&self.root)
    }

    pub fn load(&self) -> Collection {
        self.load_with_report().0
    }

    pub fn load_with_report(&self) -> (Collection, LoadReport) {
        let mut collection = Collection::new();
        let mut report = LoadReport::default();

        let files = list_record_files(&self.record_dir());
        report.files_found = files.len();

        for file in &files {
            let text = match fs::read(file) {
                // Lossy decoding: invalid bytes become U+FFFD and the
                // affected lines fail to parse on their own.
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    debug!(file = %file.display(), error = %e, "skipping unreadable record file");
                    report.files_skipped += 1;
                    continue;
                }
            };

            let records = self.parser.parse_records(&text);
            debug!(file = %file.display(), records = records.len(), "parsed record file");
            report.records_parsed += records.len();

            for record in records {
                if collection.insert(record) {
                    report.records_overwritten += 1;
                }
            }
        }

        info!(
            root = %self.root.display(),
            files = report.files_found,
            skipped = report.files_skipped,
            entries = collection.len(),
            "collection loaded"
        );

        (collection, report)
    }
}

/// `<root>/.smart-env/multi`.
pub fn record_dir(root: &Path) -> PathBuf {
    root.join(constants::ENV_DIR).join(constants::RECORD_DIR)
}

/// Record files in `dir`, sorted by file name. Empty if `dir` is missing
/// or unreadable.
pub fn list_record_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "record directory unavailable");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension()
                .is_some_and(|ext| ext == constants::RECORD_EXTENSION)
                .then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Load the collection under `root` with default settings.
pub fn load_collection(root: impl AsRef<Path>) -> Collection {
    CollectionLoader::new(root.as_ref()).load()
}
