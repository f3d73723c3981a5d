use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JmError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty vocabulary: {0}")]
    EmptyVocabulary(String),

    #[error("Embedding model not available: {0}")]
    ModelUnavailable(String),

    #[error("Failed to load embedding model: {0}")]
    ModelLoad(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding inference timed out after {0:?}")]
    InferenceTimeout(std::time::Duration),

    #[error("Embedding failed: {0}")]
    Embedding(String),
}

pub type Result<T> = std::result::Result<T, JmError>;
