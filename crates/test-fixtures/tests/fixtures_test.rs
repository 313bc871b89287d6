//! Sanity checks on the shared fixtures themselves.

use test_fixtures::{
    fixture_vault, record_line, sample_collection, FailingEncoder, FixedEncoder, TempVault,
};
use vaultsense_core::constants;
use vaultsense_core::{IQueryEncoder, RecordKind};

#[test]
fn basic_vault_is_present() {
    let root = fixture_vault("basic");
    assert!(root
        .join(constants::ENV_DIR)
        .join(constants::RECORD_DIR)
        .is_dir());
    assert!(root.join("Projects/plan.md").is_file());
}

#[test]
fn record_line_uses_key_prefix_and_model() {
    let line = record_line(RecordKind::Section, "a.md#H", &[0.5, 1.0]);
    assert!(line.starts_with("\"smart_blocks:a.md#H\": "));
    assert!(line.contains(constants::MODEL_ID));
    assert!(line.ends_with(','));
}

#[test]
fn temp_vault_writes_under_record_dir() {
    let vault = TempVault::new();
    let file = vault.write_raw("x.ajson", "");
    assert_eq!(file.parent(), Some(vault.record_dir().as_path()));

    let note = vault.write_note("deep/dir/n.md", "hi");
    assert_eq!(std::fs::read_to_string(note).unwrap(), "hi");
}

#[test]
fn sample_collection_has_four_documents() {
    let c = sample_collection();
    assert_eq!(c.len(), 4);
    assert_eq!(c.count_kind(RecordKind::Document), 4);
}

#[test]
fn canned_encoders() {
    let enc = FixedEncoder::new(3).with("q", vec![1.0, 0.0, 0.0]);
    assert_eq!(enc.encode("q").unwrap(), vec![1.0, 0.0, 0.0]);
    assert!(enc.encode("other").is_err());
    assert!(FailingEncoder.encode("q").is_err());
    assert!(!FailingEncoder.is_available());
}
