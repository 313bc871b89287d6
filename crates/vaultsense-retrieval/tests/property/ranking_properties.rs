//! Property tests: similarity algebra and ranking output shape.

use proptest::prelude::*;

use test_fixtures::FixedEncoder;
use vaultsense_core::{Collection, EmbeddingRecord, RecordKind, SearchOptions, SimilarOptions};
use vaultsense_retrieval::{cosine_similarity, find_similar, search};

fn vec_strategy(dims: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dims)
}

fn collection_strategy() -> impl Strategy<Value = Collection> {
    prop::collection::vec(
        (
            "[a-c]{1,3}(#[x-z])?",
            vec_strategy(4),
        ),
        0..40,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(path, vector)| {
                let kind = if path.contains('#') {
                    RecordKind::Section
                } else {
                    RecordKind::Document
                };
                EmbeddingRecord::new(path, vector, kind)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_similarity_symmetric(a in vec_strategy(8), b in vec_strategy(8)) {
        prop_assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn prop_similarity_in_range(a in vec_strategy(8), b in vec_strategy(8)) {
        let s = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&s));
    }

    #[test]
    fn prop_self_similarity_is_one(v in vec_strategy(16)) {
        prop_assume!(v.iter().any(|x| *x != 0.0));
        prop_assert_eq!(cosine_similarity(&v, &v), 1.0);
    }

    #[test]
    fn prop_mismatched_lengths_score_zero(a in vec_strategy(3), b in vec_strategy(4)) {
        prop_assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn prop_scores_have_three_decimals(a in vec_strategy(5), b in vec_strategy(5)) {
        let s = cosine_similarity(&a, &b);
        prop_assert!(((s * 1000.0).round() - s * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn prop_search_output_shape(
        collection in collection_strategy(),
        query in vec_strategy(4),
        limit in 1usize..15,
        threshold in -1.0f64..1.0,
    ) {
        prop_assume!(query.iter().any(|x| *x != 0.0));
        let encoder = FixedEncoder::new(4).with("q", query);
        let opts = SearchOptions::default().with_limit(limit).with_threshold(threshold);
        let hits = search("q", &collection, &encoder, &opts).unwrap();

        prop_assert!(hits.len() <= limit);
        prop_assert!(hits.iter().all(|h| h.score >= threshold));
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].path < pair[1].path);
            }
        }
    }

    #[test]
    fn prop_larger_limit_extends_prefix(
        collection in collection_strategy(),
        query in vec_strategy(4),
        limit in 1usize..10,
    ) {
        prop_assume!(query.iter().any(|x| *x != 0.0));
        let encoder = FixedEncoder::new(4).with("q", query);
        let base = SearchOptions::default().with_threshold(-1.0);
        let short = search("q", &collection, &encoder, &base.clone().with_limit(limit)).unwrap();
        let long = search("q", &collection, &encoder, &base.with_limit(limit + 5)).unwrap();
        prop_assert_eq!(&long[..short.len()], &short[..]);
    }

    #[test]
    fn prop_find_similar_never_returns_reference(collection in collection_strategy()) {
        let opts = SimilarOptions::default().with_threshold(-1.0).with_limit(100);
        for (path, _) in collection.iter() {
            let hits = find_similar(path, &collection, &opts).unwrap();
            prop_assert!(hits.iter().all(|h| h.path != path));
            prop_assert_eq!(hits.len(), collection.len() - 1);
        }
    }

    #[test]
    fn prop_section_filter_only_returns_fragments(
        collection in collection_strategy(),
        query in vec_strategy(4),
    ) {
        prop_assume!(query.iter().any(|x| *x != 0.0));
        let encoder = FixedEncoder::new(4).with("q", query);
        let opts = SearchOptions::default()
            .with_threshold(-1.0)
            .with_limit(100)
            .with_kind(RecordKind::Section);
        let hits = search("q", &collection, &encoder, &opts).unwrap();
        prop_assert!(hits.iter().all(|h| h.path.contains('#')));
        prop_assert_eq!(hits.len(), collection.count_kind(RecordKind::Section));
    }
}
