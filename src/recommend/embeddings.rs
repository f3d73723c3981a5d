//! Embedding models
//!
//! Three backends implement [`Embedder`]:
//! - `SentenceEmbedder` (`minilm`, feature `fastembed`): the pretrained
//!   all-MiniLM-L6-v2 sentence model run through ONNX. This is the backend
//!   that gives the semantic method real meaning.
//! - [`StaticEmbedder`] (`static`): pretrained word vectors (GloVe or
//!   word2vec text format), mean-pooled over the words of a text.
//! - [`HashEmbedder`] (`hash`): signed feature hashing of words and word
//!   pairs. No model file and fully deterministic, so it serves offline runs
//!   and tests. It only captures vocabulary overlap.
//!
//! [`ModelHandle`] owns the process-wide model. It is constructed explicitly,
//! loads at most once, and stays unavailable forever if that load fails.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::{error, info};

use crate::config::SemanticConfig;
use crate::error::{JmError, Result};
use crate::recommend::normalize::normalize;

/// Pluggable embedding backend interface
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
    fn dims(&self) -> usize;
    fn name(&self) -> &str;
}

/// Build an embedder from semantic config.
pub fn build_embedder(config: &SemanticConfig) -> Result<Arc<dyn Embedder>> {
    if !config.enabled {
        return Err(JmError::ModelUnavailable(
            "semantic.enabled is false".to_string(),
        ));
    }

    let backend = config.backend.trim().to_lowercase();
    match backend.as_str() {
        "" | "hash" => {
            if config.dims == 0 {
                return Err(JmError::Config(
                    "semantic.dims must be greater than 0".to_string(),
                ));
            }
            Ok(Arc::new(HashEmbedder::new(config.dims)))
        }
        "static" => {
            let path = config.model_path.as_deref().ok_or_else(|| {
                JmError::MissingConfig(
                    "semantic.model_path is required for the static backend".to_string(),
                )
            })?;
            Ok(Arc::new(StaticEmbedder::load(Path::new(path))?))
        }
        "minilm" | "fastembed" | "sentence" => load_sentence_model(config),
        "none" | "disabled" => Err(JmError::ModelUnavailable(
            "semantic.backend is disabled".to_string(),
        )),
        other => Err(JmError::Config(format!("unknown embedding backend: {other}"))),
    }
}

#[cfg(feature = "fastembed")]
fn load_sentence_model(config: &SemanticConfig) -> Result<Arc<dyn Embedder>> {
    let cache_dir = config.model_path.as_deref().map(Path::new);
    Ok(Arc::new(super::sentence::SentenceEmbedder::load(cache_dir)?))
}

#[cfg(not(feature = "fastembed"))]
fn load_sentence_model(_config: &SemanticConfig) -> Result<Arc<dyn Embedder>> {
    Err(JmError::ModelUnavailable(
        "the minilm backend needs jm built with the `fastembed` feature".to_string(),
    ))
}

/// Lazily-initialized, shared, read-only embedding model.
pub struct ModelHandle {
    config: SemanticConfig,
    model: OnceLock<Option<Arc<dyn Embedder>>>,
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("backend", &self.config.backend)
            .field("loaded", &self.model.get().map(Option::is_some))
            .finish()
    }
}

impl ModelHandle {
    /// Handle that loads the configured backend on first use.
    #[must_use]
    pub fn new(config: SemanticConfig) -> Self {
        Self {
            config,
            model: OnceLock::new(),
        }
    }

    /// Handle around an already constructed embedder.
    #[must_use]
    pub fn with_embedder(embedder: Arc<dyn Embedder>) -> Self {
        let model = OnceLock::new();
        let _ = model.set(Some(embedder));
        Self {
            config: SemanticConfig::default(),
            model,
        }
    }

    /// Handle whose model failed to load.
    #[must_use]
    pub fn unavailable() -> Self {
        let model = OnceLock::new();
        let _ = model.set(None);
        Self {
            config: SemanticConfig::default(),
            model,
        }
    }

    /// The loaded model, loading it on first call.
    pub fn get(&self) -> Option<Arc<dyn Embedder>> {
        self.model
            .get_or_init(|| match build_embedder(&self.config) {
                Ok(embedder) => {
                    info!(
                        backend = embedder.name(),
                        dims = embedder.dims(),
                        "embedding model loaded"
                    );
                    Some(embedder)
                }
                Err(err) => {
                    error!(error = %err, "embedding model unavailable; semantic search disabled");
                    None
                }
            })
            .clone()
    }

    pub fn is_available(&self) -> bool {
        self.get().is_some()
    }

    #[must_use]
    pub const fn config(&self) -> &SemanticConfig {
        &self.config
    }
}

/// Word and word-pair features scattered into a fixed-width signed vector.
///
/// Each feature writes `SLOTS_PER_FEATURE` signed unit weights. Slot
/// position comes from the low bits of a mixed hash and slot sign from its
/// top bit, so distinct features land on unrelated sign patterns.
pub struct HashEmbedder {
    dims: usize,
}

const SLOTS_PER_FEATURE: u64 = 4;
const WORD_WEIGHT: f32 = 1.0;
const PAIR_WEIGHT: f32 = 0.5;

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dims: 384 }
    }
}

impl HashEmbedder {
    #[must_use]
    pub const fn new(dims: usize) -> Self {
        Self { dims }
    }

    /// L2-normalized embedding. Texts without a word of two or more
    /// characters map to the zero vector.
    #[must_use]
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0; self.dims];
        if self.dims == 0 {
            return embedding;
        }

        let words = words(text);
        for word in &words {
            scatter(&mut embedding, word.as_bytes(), WORD_WEIGHT);
        }
        for pair in words.windows(2) {
            let joined = [pair[0].as_bytes(), b" ", pair[1].as_bytes()].concat();
            scatter(&mut embedding, &joined, PAIR_WEIGHT);
        }

        l2_normalize(&mut embedding);
        embedding
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// Pretrained static word vectors, mean-pooled per text.
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dims: usize,
}

impl StaticEmbedder {
    /// Load a word-vector text file: one `word v1 v2 ... vd` entry per line.
    /// A leading word2vec `count dims` header line is skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| JmError::ModelLoad(format!("read {}: {err}", path.display())))?;
        let embedder = Self::parse(&raw)?;
        info!(
            path = %path.display(),
            words = embedder.vectors.len(),
            dims = embedder.dims,
            "loaded static word vectors"
        );
        Ok(embedder)
    }

    /// Parse word vectors from text.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut vectors = HashMap::new();
        let mut dims = 0usize;

        for (line_no, line) in raw.lines().enumerate() {
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let values: Vec<&str> = parts.collect();

            if line_no == 0 && values.len() == 1 && word.parse::<usize>().is_ok() {
                continue;
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|err| {
                    JmError::ModelLoad(format!("line {}: invalid component: {err}", line_no + 1))
                })?;

            if vector.is_empty() {
                return Err(JmError::ModelLoad(format!(
                    "line {}: word without vector",
                    line_no + 1
                )));
            }
            if dims == 0 {
                dims = vector.len();
            } else if vector.len() != dims {
                return Err(JmError::ModelLoad(format!(
                    "line {}: expected {dims} components, found {}",
                    line_no + 1,
                    vector.len()
                )));
            }

            vectors.insert(word.to_lowercase(), vector);
        }

        if vectors.is_empty() {
            return Err(JmError::ModelLoad("no word vectors found".to_string()));
        }

        Ok(Self { vectors, dims })
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vectors.len()
    }
}

impl Embedder for StaticEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embedding = vec![0.0; self.dims];
        for word in words(text) {
            if let Some(vector) = self.vectors.get(&word) {
                for (acc, value) in embedding.iter_mut().zip(vector) {
                    *acc += value;
                }
            }
        }
        // Mean pooling and L2 normalization differ only by scale.
        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Normalized words of at least two characters.
fn words(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|word| word.chars().count() >= 2)
        .map(ToString::to_string)
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn scatter(embedding: &mut [f32], feature: &[u8], weight: f32) {
    let width = embedding.len() as u64;
    let base = fnv1a(feature);
    for slot in 0..SLOTS_PER_FEATURE {
        let mixed = mix64(base ^ slot.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        let position = (mixed % width) as usize;
        embedding[position] += if mixed >> 63 == 0 { weight } else { -weight };
    }
}

fn fnv1a(data: &[u8]) -> u64 {
    data.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// splitmix64 finalizer: every input bit affects every output bit.
const fn mix64(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

pub(crate) fn l2_normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vec.iter_mut() {
            *value /= norm;
        }
    }
}
