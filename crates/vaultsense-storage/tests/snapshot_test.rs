//! Snapshot publication and reload.

use std::sync::Arc;
use std::thread;

use test_fixtures::{record_line, sample_collection, TempVault};
use vaultsense_core::RecordKind;
use vaultsense_storage::SnapshotStore;

#[test]
fn reload_picks_up_new_files() {
    let vault = TempVault::new();
    vault.write_raw(
        "a.ajson",
        &record_line(RecordKind::Document, "a.md", &[1.0, 0.0]),
    );

    let store = SnapshotStore::open(vault.root());
    assert_eq!(store.current().len(), 1);
    let first_loaded = store.loaded_at();

    vault.write_raw(
        "b.ajson",
        &record_line(RecordKind::Section, "a.md#h", &[0.0, 1.0]),
    );
    let summary = store.reload();

    assert_eq!(summary.previous_len, 1);
    assert_eq!(summary.current_len, 2);
    assert!(summary.loaded_at >= first_loaded);
    assert_eq!(store.loaded_at(), summary.loaded_at);
    assert!(store.current().contains("a.md#h"));
}

#[test]
fn held_snapshot_is_unaffected_by_reload() {
    let vault = TempVault::new();
    vault.write_raw(
        "a.ajson",
        &record_line(RecordKind::Document, "a.md", &[1.0]),
    );
    let store = SnapshotStore::open(vault.root());
    let held = store.current();

    std::fs::remove_file(vault.record_dir().join("a.ajson")).unwrap();
    store.reload();

    assert_eq!(held.len(), 1);
    assert!(store.current().is_empty());
    assert!(!Arc::ptr_eq(&held, &store.current()));
}

#[test]
fn from_collection_publishes_as_is() {
    let vault = TempVault::new();
    let store = SnapshotStore::from_collection(vault.root(), sample_collection());
    assert_eq!(store.current().len(), 4);
    assert_eq!(store.root(), vault.root());

    // Reloading reads from disk, which has nothing.
    assert_eq!(store.reload().current_len, 0);
}

#[test]
fn readers_see_whole_snapshots_during_reload() {
    let vault = TempVault::new();
    let lines: Vec<String> = (0..50)
        .map(|i| record_line(RecordKind::Document, &format!("n{i}.md"), &[i as f32, 1.0]))
        .collect();
    vault.write_raw("a.ajson", &lines.join("\n"));

    let store = Arc::new(SnapshotStore::open(vault.root()));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    assert_eq!(store.current().len(), 50);
                }
            })
        })
        .collect();

    for _ in 0..20 {
        store.reload();
    }
    for r in readers {
        r.join().unwrap();
    }
}
