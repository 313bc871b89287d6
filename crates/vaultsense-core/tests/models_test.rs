use proptest::prelude::*;

use vaultsense_core::models::record::document_path;
use vaultsense_core::{Collection, CollectionStats, EmbeddingRecord, RecordKind};

#[test]
fn split_key_recognises_both_prefixes() {
    assert_eq!(
        RecordKind::split_key("smart_sources:notes/a.md"),
        Some((RecordKind::Document, "notes/a.md"))
    );
    assert_eq!(
        RecordKind::split_key("smart_blocks:notes/a.md#Intro"),
        Some((RecordKind::Section, "notes/a.md#Intro"))
    );
    assert_eq!(RecordKind::split_key("smart_things:notes/a.md"), None);
    assert_eq!(RecordKind::split_key("smart_sources:"), None);
}

#[test]
fn record_kind_parses_aliases() {
    assert_eq!("Document".parse::<RecordKind>(), Ok(RecordKind::Document));
    assert_eq!("sources".parse::<RecordKind>(), Ok(RecordKind::Document));
    assert_eq!("SECTION".parse::<RecordKind>(), Ok(RecordKind::Section));
    assert_eq!("blocks".parse::<RecordKind>(), Ok(RecordKind::Section));
    assert!("paragraph".parse::<RecordKind>().is_err());
}

#[test]
fn document_path_strips_fragment() {
    assert_eq!(document_path("notes/a.md#Intro#Deep"), "notes/a.md");
    assert_eq!(document_path("notes/a.md"), "notes/a.md");
    let rec = EmbeddingRecord::new("x.md#h", vec![1.0], RecordKind::Section);
    assert_eq!(rec.document_path(), "x.md");
}

#[test]
fn stats_serialize_in_camel_case() {
    let stats = CollectionStats {
        document_count: 1,
        section_count: 2,
        dimensions: 3,
        model_id: "m".into(),
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["documentCount"], 1);
    assert_eq!(json["sectionCount"], 2);
    assert_eq!(json["modelId"], "m");
}

proptest! {
    #[test]
    fn prop_paths_stay_unique(paths in prop::collection::vec("[a-c]{1,2}", 0..30)) {
        let collection: Collection = paths
            .iter()
            .map(|p| EmbeddingRecord::new(p.clone(), vec![1.0], RecordKind::Document))
            .collect();
        let unique: std::collections::BTreeSet<&String> = paths.iter().collect();
        prop_assert_eq!(collection.len(), unique.len());
    }

    #[test]
    fn prop_last_insert_wins(values in prop::collection::vec(-10.0f32..10.0, 1..10)) {
        let mut collection = Collection::new();
        for v in &values {
            collection.insert(EmbeddingRecord::new("same.md", vec![*v], RecordKind::Document));
        }
        let last = *values.last().unwrap();
        prop_assert_eq!(collection.get("same.md").unwrap().vector(), &[last][..]);
    }
}
