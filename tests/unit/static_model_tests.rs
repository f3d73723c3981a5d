//! Semantic ranking with a loaded word-vector model.

use std::sync::Arc;

use jobmatch::config::{LexicalConfig, SemanticConfig};
use jobmatch::recommend::{
    Embedder, Method, ModelHandle, Recommender, SEMANTIC_LABEL, StaticEmbedder, build_embedder,
};
use jobmatch::test_utils::fixtures::sample_jobs;

const VECTORS: &str = "\
python 1.0 0.0 0.0
django 0.9 0.1 0.0
tensorflow 0.6 0.0 0.8
machine 0.5 0.0 0.9
learning 0.5 0.0 0.9
figma 0.0 1.0 0.0
css 0.0 0.9 0.1
designer 0.0 1.0 0.0
";

fn write_vectors(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("vectors.txt");
    std::fs::write(&path, VECTORS).unwrap();
    path
}

#[test]
fn static_backend_loads_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_vectors(dir.path());
    let config = SemanticConfig {
        backend: "static".to_string(),
        model_path: Some(path.to_string_lossy().into_owned()),
        ..SemanticConfig::default()
    };
    let model = build_embedder(&config).unwrap();
    assert_eq!(model.dims(), 3);
    assert_eq!(model.name(), "static");
}

#[test]
fn static_backend_without_path_is_unavailable() {
    let config = SemanticConfig {
        backend: "static".to_string(),
        model_path: None,
        ..SemanticConfig::default()
    };
    let handle = ModelHandle::new(config);
    assert!(!handle.is_available());
    assert!(handle.get().is_none());
}

#[test]
fn semantic_ranking_follows_word_vectors() {
    let model = StaticEmbedder::parse(VECTORS).unwrap();
    let handle = ModelHandle::with_embedder(Arc::new(model));
    let jobs = sample_jobs();

    let ranked = Recommender::new(&handle, LexicalConfig::default()).recommend(
        &jobs,
        "figma css designer",
        Method::Semantic,
        3,
    );
    assert_eq!(ranked[0].job.id, "job-b");
    assert_eq!(ranked[0].method, SEMANTIC_LABEL);
    assert!(ranked[0].similarity_score > ranked[2].similarity_score);
}
