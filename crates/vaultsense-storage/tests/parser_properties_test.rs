//! Property tests: the parser never panics and only yields well-formed records.

use proptest::prelude::*;

use test_fixtures::record_line;
use vaultsense_core::RecordKind;
use vaultsense_storage::{parse_line, parse_records};

fn kind_strategy() -> impl Strategy<Value = RecordKind> {
    prop_oneof![Just(RecordKind::Document), Just(RecordKind::Section)]
}

proptest! {
    #[test]
    fn prop_arbitrary_text_never_panics(text in ".{0,400}") {
        for record in parse_records(&text) {
            prop_assert!(!record.path.is_empty());
            prop_assert!(!record.vector.is_empty());
            prop_assert!(record.vector.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn prop_wellformed_line_roundtrips(
        kind in kind_strategy(),
        path in "[a-zA-Z0-9 _/.#-]{1,40}",
        vector in prop::collection::vec(-1.0f32..1.0, 1..16),
    ) {
        let record = parse_line(&record_line(kind, &path, &vector)).unwrap();
        prop_assert_eq!(record.kind, kind);
        prop_assert_eq!(&record.path, &path);
        prop_assert_eq!(record.vector, vector);
    }

    #[test]
    fn prop_prefix_of_line_never_misparses(
        path in "[a-z]{1,12}\\.md",
        vector in prop::collection::vec(-1.0f32..1.0, 1..8),
        cut_frac in 0.0f64..1.0,
    ) {
        let line = record_line(RecordKind::Document, &path, &vector);
        // Strip the comma and the final brace so the object is unbalanced.
        let body = &line[..line.len() - 2];
        let cut = ((body.len() as f64) * cut_frac) as usize;
        prop_assert!(parse_line(&body[..cut]).is_none());
    }
}
