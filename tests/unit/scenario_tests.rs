//! End-to-end ranking scenarios through the public recommender API.

use std::sync::Arc;

use jobmatch::config::LexicalConfig;
use jobmatch::recommend::{
    FALLBACK_LABEL, HYBRID_LABEL, HashEmbedder, LEXICAL_LABEL, Method, ModelHandle, Recommender,
    SEMANTIC_LABEL,
};
use jobmatch::test_utils::fixtures::{sample_jobs, scenario_query, synthetic_jobs};
use jobmatch::test_utils::logging::init_test_tracing;

fn hash_handle() -> ModelHandle {
    init_test_tracing();
    ModelHandle::with_embedder(Arc::new(HashEmbedder::new(384)))
}

#[test]
fn scenario_lexical_puts_designer_last() {
    let handle = hash_handle();
    let jobs = sample_jobs();
    let ranked = Recommender::new(&handle, LexicalConfig::default()).recommend(
        &jobs,
        scenario_query(),
        Method::Lexical,
        20,
    );

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[2].job.id, "job-b");
    assert_eq!(ranked[2].similarity_score, 0.0);
    assert!(ranked[0].similarity_score > 0.0);
    assert!(ranked.iter().all(|r| r.method == LEXICAL_LABEL));
}

#[test]
fn scenario_semantic_scores_are_bounded() {
    let handle = hash_handle();
    let jobs = sample_jobs();
    let ranked = Recommender::new(&handle, LexicalConfig::default()).recommend(
        &jobs,
        scenario_query(),
        Method::Semantic,
        20,
    );

    assert_eq!(ranked.len(), 3);
    for entry in &ranked {
        assert_eq!(entry.method, SEMANTIC_LABEL);
        assert!((0.0..=100.0).contains(&entry.similarity_score));
        assert!(entry.ai_ranked);
    }
}

#[test]
fn scenario_semantic_follows_shared_vocabulary() {
    let handle = hash_handle();
    let jobs = sample_jobs();
    let ranked = Recommender::new(&handle, LexicalConfig::default()).recommend(
        &jobs,
        scenario_query(),
        Method::Semantic,
        20,
    );

    assert_eq!(ranked[2].job.id, "job-b");
    assert!(ranked[1].similarity_score > ranked[2].similarity_score);
    assert!(ranked[0].similarity_score < 100.0);
}

#[test]
fn scenario_unavailable_model_uses_keyword_scores() {
    let handle = ModelHandle::unavailable();
    let jobs = sample_jobs();
    let ranked = Recommender::new(&handle, LexicalConfig::default()).recommend(
        &jobs,
        "python and django",
        Method::Semantic,
        20,
    );

    // Only "python" is a known skill; ties keep corpus order.
    assert_eq!(ranked[0].job.id, "job-a");
    assert_eq!(ranked[0].similarity_score, 95.0);
    assert_eq!(ranked[0].skill_matches, Some(1));
    assert_eq!(ranked[1].job.id, "job-c");
    assert_eq!(ranked[1].similarity_score, 95.0);
    assert_eq!(ranked[2].similarity_score, 20.0);
    assert!(ranked.iter().all(|r| r.method == FALLBACK_LABEL && !r.ai_ranked));
}

#[test]
fn hybrid_length_is_bounded_by_top_n_and_corpus() {
    let handle = hash_handle();
    let recommender = Recommender::new(&handle, LexicalConfig::default());
    let jobs = synthetic_jobs(30);

    for top_n in [1, 5, 30, 50] {
        let ranked = recommender.recommend(&jobs, "python django backend", Method::Hybrid, top_n);
        assert_eq!(ranked.len(), top_n.min(jobs.len()), "top_n {top_n}");
        assert!(ranked.iter().all(|r| r.method == HYBRID_LABEL));
    }
}

#[test]
fn hybrid_fused_scores_lie_between_sub_scores() {
    let handle = hash_handle();
    let recommender = Recommender::new(&handle, LexicalConfig::default());
    let jobs = sample_jobs();
    let n = jobs.len();

    let lexical = recommender.recommend(&jobs, scenario_query(), Method::Lexical, n);
    let semantic = recommender.recommend(&jobs, scenario_query(), Method::Semantic, n);
    let hybrid = recommender.recommend(&jobs, scenario_query(), Method::Hybrid, n);

    assert_eq!(hybrid.len(), n);
    for entry in &hybrid {
        let lex = lexical.iter().find(|r| r.job.id == entry.job.id).unwrap();
        let sem = semantic.iter().find(|r| r.job.id == entry.job.id).unwrap();
        let lo = lex.similarity_score.min(sem.similarity_score);
        let hi = lex.similarity_score.max(sem.similarity_score);
        assert!(
            entry.similarity_score >= lo - 0.1 && entry.similarity_score <= hi + 0.1,
            "{} not within [{lo}, {hi}]",
            entry.similarity_score
        );
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    let handle = hash_handle();
    let recommender = Recommender::new(&handle, LexicalConfig::default());
    let jobs = synthetic_jobs(12);
    let first = recommender.recommend(&jobs, "kubernetes aws docker", Method::Hybrid, 10);
    let second = recommender.recommend(&jobs, "kubernetes aws docker", Method::Hybrid, 10);
    assert_eq!(first, second);
}

#[test]
fn recommendation_json_flattens_job_fields() {
    let handle = hash_handle();
    let jobs = sample_jobs();
    let ranked = Recommender::new(&handle, LexicalConfig::default()).recommend(
        &jobs,
        "python",
        Method::Keyword,
        1,
    );
    let json = serde_json::to_value(&ranked[0]).unwrap();
    assert!(json.get("position").is_some());
    assert!(json.get("workplace").is_some());
    assert!(json.get("similarity_score").is_some());
    assert_eq!(json["method"], FALLBACK_LABEL);
    assert!(json.get("corpus_index").is_none());
    assert!(json.get("is_active").is_none());
}
