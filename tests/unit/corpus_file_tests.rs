use jobmatch::JmError;
use jobmatch::config::CorpusConfig;
use jobmatch::corpus::{WorkingMode, load_jobs};
use jobmatch::test_utils::fixtures::{sample_jobs, sample_jobs_json};

#[test]
fn loads_json_array_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    std::fs::write(&path, sample_jobs_json()).unwrap();

    let jobs = load_jobs(&path, &CorpusConfig::default()).unwrap();
    assert_eq!(jobs, sample_jobs());
}

#[test]
fn loads_jsonl_file_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"id\": \"x1\", \"position\": \"Data Analyst\", \"working_mode\": \"WFH\"}\n",
            "{\"id\": \"x2\", \"position\": \"Intern\", \"working_mode\": \"internship\", \"is_active\": false}\n",
        ),
    )
    .unwrap();

    let jobs = load_jobs(&path, &CorpusConfig::default()).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "x1");
    assert_eq!(jobs[0].working_mode, WorkingMode::Remote);
}

#[test]
fn missing_file_is_invalid_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_jobs(&dir.path().join("absent.json"), &CorpusConfig::default()).unwrap_err();
    assert!(matches!(err, JmError::InvalidCorpus(_)));
}
