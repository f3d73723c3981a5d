use jobmatch::JmError;
use jobmatch::config::Config;

#[test]
fn explicit_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "[lexical]\nmax_features = 50\n\n[semantic]\nbackend = \"none\"\ninference_timeout_ms = 0\n",
    )
    .unwrap();

    let config = Config::load(Some(&path), dir.path()).unwrap();
    assert_eq!(config.lexical.max_features, 50);
    assert_eq!(config.lexical.ngram_max, 2);
    assert_eq!(config.semantic.backend, "none");
    assert_eq!(config.semantic.inference_timeout(), None);
    assert_eq!(config.recommend.top_n, 20);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, JmError::MissingConfig(_)));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[lexical\nmax_features = ").unwrap();
    let err = Config::load(Some(&path), dir.path()).unwrap_err();
    assert!(matches!(err, JmError::Config(_)));
}
