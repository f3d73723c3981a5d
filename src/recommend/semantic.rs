//! Dense semantic index
//!
//! Corpus texts are encoded with the shared model, stored as `f16` rows in a
//! flat (exact, brute-force) inner-product index, and searched per query.
//!
//! Embeddings are L2-normalized, so the index reports cosine distance
//! `1 - inner_product`. Scores use `clamp((1 - distance) * 100, 0, 100)`:
//! a closer row always scores higher. Changing the index metric means
//! re-deriving that transform.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use half::f16;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{JmError, Result};
use crate::recommend::embeddings::Embedder;
use crate::recommend::normalize::normalize;

/// Exact inner-product search over half-precision rows.
#[derive(Debug, Clone)]
pub struct FlatIpIndex {
    dims: usize,
    data: Vec<f16>,
}

impl FlatIpIndex {
    #[must_use]
    pub const fn new(dims: usize) -> Self {
        Self {
            dims,
            data: Vec::new(),
        }
    }

    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims
    }

    #[must_use]
    pub fn len(&self) -> usize {
        if self.dims == 0 { 0 } else { self.data.len() / self.dims }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a row, converting to `f16`.
    pub fn add(&mut self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dims {
            return Err(JmError::DimensionMismatch {
                expected: self.dims,
                actual: vector.len(),
            });
        }
        self.data.extend(vector.iter().map(|v| f16::from_f32(*v)));
        Ok(())
    }

    /// Top `k` rows by inner product, highest first; ties keep row order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dims {
            return Err(JmError::DimensionMismatch {
                expected: self.dims,
                actual: query.len(),
            });
        }
        if self.dims == 0 {
            return Ok(Vec::new());
        }

        let mut scores: Vec<(usize, f32)> = self
            .data
            .chunks_exact(self.dims)
            .enumerate()
            .map(|(idx, row)| {
                let ip = row
                    .iter()
                    .zip(query)
                    .map(|(a, b)| a.to_f32() * b)
                    .sum::<f32>();
                (idx, ip)
            })
            .collect();

        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scores.truncate(k);
        Ok(scores)
    }
}

/// Per-call semantic index over one corpus snapshot.
pub struct SemanticIndex {
    model: Arc<dyn Embedder>,
    index: FlatIpIndex,
    timeout: Option<Duration>,
}

impl SemanticIndex {
    /// Encode every normalized text and load the flat index.
    pub fn build<S: AsRef<str>>(
        model: Arc<dyn Embedder>,
        texts: &[S],
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let normalized: Vec<String> = texts.iter().map(|t| normalize(t.as_ref())).collect();
        let embeddings = encode_with_timeout(&model, normalized, timeout)?;

        let mut index = FlatIpIndex::new(model.dims());
        for embedding in &embeddings {
            index.add(embedding)?;
        }

        debug!(
            records = index.len(),
            dims = index.dims(),
            model = model.name(),
            "built semantic index"
        );
        Ok(Self {
            model,
            index,
            timeout,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Top `top_n` records as `(record index, score in [0, 100])`.
    pub fn query(&self, text: &str, top_n: usize) -> Result<Vec<(usize, f32)>> {
        let mut embeddings =
            encode_with_timeout(&self.model, vec![normalize(text)], self.timeout)?;
        let embedding = embeddings
            .pop()
            .ok_or_else(|| JmError::Embedding("no query embedding produced".to_string()))?;
        // Match the precision of the stored rows.
        let embedding: Vec<f32> = embedding
            .iter()
            .map(|v| f16::from_f32(*v).to_f32())
            .collect();

        let hits = self.index.search(&embedding, top_n)?;
        Ok(hits
            .into_iter()
            .map(|(idx, ip)| (idx, distance_to_score(1.0 - ip)))
            .collect())
    }
}

/// Map cosine distance to a bounded score; smaller distance scores higher.
#[must_use]
pub fn distance_to_score(distance: f32) -> f32 {
    if distance.is_nan() {
        return 0.0;
    }
    ((1.0 - distance) * 100.0).clamp(0.0, 100.0)
}

fn encode_batch(model: &dyn Embedder, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let dims = model.dims();
    texts
        .par_iter()
        .map(|text| {
            let embedding = model.embed(text)?;
            if embedding.len() == dims {
                Ok(embedding)
            } else {
                Err(JmError::DimensionMismatch {
                    expected: dims,
                    actual: embedding.len(),
                })
            }
        })
        .collect()
}

/// Run inference on a worker thread and give up after `timeout`.
fn encode_with_timeout(
    model: &Arc<dyn Embedder>,
    texts: Vec<String>,
    timeout: Option<Duration>,
) -> Result<Vec<Vec<f32>>> {
    let Some(timeout) = timeout else {
        return encode_batch(model.as_ref(), &texts);
    };

    let (tx, rx) = crossbeam_channel::bounded(1);
    let worker_model = Arc::clone(model);
    std::thread::Builder::new()
        .name("jm-embed".to_string())
        .spawn(move || {
            let _ = tx.send(encode_batch(worker_model.as_ref(), &texts));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
            warn!(?timeout, "embedding inference timed out");
            Err(JmError::InferenceTimeout(timeout))
        }
        Err(crossbeam_channel::RecvTimeoutError::Disconnected) => Err(JmError::Embedding(
            "embedding worker exited without a result".to_string(),
        )),
    }
}
