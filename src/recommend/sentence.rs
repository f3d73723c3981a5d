//! Pretrained sentence embeddings via fastembed (ONNX runtime).
//!
//! Wraps all-MiniLM-L6-v2, a 384-dimensional MiniLM sentence model. The model
//! files are fetched into the fastembed cache on first load.

use std::path::Path;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use crate::error::{JmError, Result};
use crate::recommend::embeddings::{Embedder, l2_normalize};

pub const MINILM_DIMS: usize = 384;

pub struct SentenceEmbedder {
    // fastembed runs inference through `&mut self`
    model: Mutex<TextEmbedding>,
}

impl SentenceEmbedder {
    /// Load the MiniLM model, caching its files under `cache_dir` when set.
    pub fn load(cache_dir: Option<&Path>) -> Result<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|err| JmError::ModelLoad(format!("all-MiniLM-L6-v2: {err}")))?;
        info!(
            model = "all-MiniLM-L6-v2",
            dims = MINILM_DIMS,
            cache_dir = ?cache_dir,
            "loaded sentence model"
        );
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| JmError::Embedding("sentence model lock poisoned".to_string()))?;
        let mut batch = model
            .embed(vec![text], None)
            .map_err(|err| JmError::Embedding(err.to_string()))?;
        let mut embedding = batch
            .pop()
            .ok_or_else(|| JmError::Embedding("model returned no embedding".to_string()))?;
        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn dims(&self) -> usize {
        MINILM_DIMS
    }

    fn name(&self) -> &str {
        "minilm"
    }
}
