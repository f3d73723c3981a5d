use std::sync::Arc;

use proptest::prelude::*;

use jobmatch::config::LexicalConfig;
use jobmatch::recommend::fusion::relabel;
use jobmatch::recommend::{
    FALLBACK_LABEL, HYBRID_LABEL, HashEmbedder, Method, ModelHandle, Recommender,
};
use jobmatch::test_utils::fixtures::synthetic_jobs;

fn arb_method() -> impl Strategy<Value = Method> {
    prop_oneof![
        Just(Method::Lexical),
        Just(Method::Semantic),
        Just(Method::Hybrid),
        Just(Method::Keyword),
    ]
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("python"),
            Just("django"),
            Just("react"),
            Just("kubernetes"),
            Just("sql"),
            Just("designer"),
            Just("ownership"),
            Just("teamwork"),
        ],
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn output_length_and_order(
        count in 0usize..24,
        top_n in 1usize..30,
        method in arb_method(),
        query in arb_query(),
    ) {
        let handle = ModelHandle::with_embedder(Arc::new(HashEmbedder::new(64)));
        let jobs = synthetic_jobs(count);
        let ranked = Recommender::new(&handle, LexicalConfig::default())
            .recommend(&jobs, &query, method, top_n);

        prop_assert_eq!(ranked.len(), top_n.min(count));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
        for entry in &ranked {
            prop_assert!((0.0..=100.0).contains(&entry.similarity_score));
        }
    }

    #[test]
    fn unavailable_model_never_yields_semantic_entries(
        count in 1usize..16,
        query in arb_query(),
    ) {
        let handle = ModelHandle::unavailable();
        let jobs = synthetic_jobs(count);
        let recommender = Recommender::new(&handle, LexicalConfig::default());

        let semantic = recommender.recommend(&jobs, &query, Method::Semantic, 20);
        prop_assert!(semantic.iter().all(|r| r.method == FALLBACK_LABEL));

        let hybrid = recommender.recommend(&jobs, &query, Method::Hybrid, 20);
        let lexical = recommender.recommend(&jobs, &query, Method::Lexical, 20);
        prop_assert_eq!(hybrid, relabel(lexical));
    }

    #[test]
    fn hybrid_entries_are_labeled(count in 1usize..16, query in arb_query()) {
        let handle = ModelHandle::with_embedder(Arc::new(HashEmbedder::new(64)));
        let jobs = synthetic_jobs(count);
        let ranked = Recommender::new(&handle, LexicalConfig::default())
            .recommend(&jobs, &query, Method::Hybrid, 20);
        prop_assert!(ranked.iter().all(|r| r.method == HYBRID_LABEL && r.ai_ranked));
    }
}
