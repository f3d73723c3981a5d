//! Recommendation orchestration.
//!
//! Each call builds the indexes its method needs over the given corpus,
//! queries them, fuses for hybrid, and degrades to keyword matching when no
//! vector method is available. No state survives between calls apart from
//! the shared model handle.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Config, LexicalConfig};
use crate::corpus::JobRecord;
use crate::recommend::embeddings::ModelHandle;
use crate::recommend::fallback;
use crate::recommend::fusion;
use crate::recommend::lexical::LexicalIndex;
use crate::recommend::semantic::SemanticIndex;

pub const LEXICAL_LABEL: &str = "TF-IDF + Cosine Similarity";
pub const SEMANTIC_LABEL: &str = "Semantic Search (Embeddings)";
pub const HYBRID_LABEL: &str = "Hybrid (TF-IDF + Semantic)";
pub const FALLBACK_LABEL: &str = "Simple Keyword Matching";

pub const DEFAULT_TOP_N: usize = 20;

/// Ranking method requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Lexical,
    Semantic,
    #[default]
    Hybrid,
    /// Keyword matching only
    Keyword,
}

impl Method {
    /// Parse a method name. Unknown names fall back to `Hybrid`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "lexical" | "tfidf" | "tf-idf" => Self::Lexical,
            "semantic" | "bert" | "embedding" | "embeddings" => Self::Semantic,
            "keyword" | "simple" | "fallback" => Self::Keyword,
            _ => Self::Hybrid,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Semantic => "semantic",
            Self::Hybrid => "hybrid",
            Self::Keyword => "keyword",
        }
    }

    const fn needs_lexical(self) -> bool {
        matches!(self, Self::Lexical | Self::Hybrid)
    }

    const fn needs_semantic(self) -> bool {
        matches!(self, Self::Semantic | Self::Hybrid)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub job: JobRecord,
    /// Score in `[0, 100]`, one decimal
    pub similarity_score: f64,
    /// True when a vector method produced the ranking
    pub ai_ranked: bool,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_matches: Option<usize>,
    /// Position of the job in the input corpus
    #[serde(skip)]
    pub corpus_index: usize,
}

impl Recommendation {
    pub fn new(
        job: &JobRecord,
        corpus_index: usize,
        similarity_score: f64,
        method: &str,
        ai_ranked: bool,
    ) -> Self {
        Self {
            job: job.clone(),
            similarity_score,
            ai_ranked,
            method: method.to_string(),
            skill_matches: None,
            corpus_index,
        }
    }
}

/// Round to one decimal place.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Sort by descending score, ties by corpus order.
pub fn sort_ranked(entries: &mut [Recommendation]) {
    entries.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(Ordering::Equal)
            .then(a.corpus_index.cmp(&b.corpus_index))
    });
}

/// Recommendation orchestrator.
#[derive(Debug)]
pub struct Recommender<'a> {
    model: &'a ModelHandle,
    lexical: LexicalConfig,
}

impl<'a> Recommender<'a> {
    #[must_use]
    pub const fn new(model: &'a ModelHandle, lexical: LexicalConfig) -> Self {
        Self { model, lexical }
    }

    #[must_use]
    pub fn from_config(model: &'a ModelHandle, config: &Config) -> Self {
        Self::new(model, config.lexical.clone())
    }

    /// Rank `jobs` against `query` and return at most `top_n` entries.
    ///
    /// Never fails: unavailable methods degrade to the keyword matcher.
    #[must_use]
    pub fn recommend(
        &self,
        jobs: &[JobRecord],
        query: &str,
        method: Method,
        top_n: usize,
    ) -> Vec<Recommendation> {
        if jobs.is_empty() {
            info!("empty corpus; nothing to recommend");
            return Vec::new();
        }

        let texts: Vec<String> = jobs.iter().map(JobRecord::composite_text).collect();

        let lexical = if method.needs_lexical() {
            self.lexical_entries(jobs, &texts, query, top_n)
        } else {
            None
        };
        let semantic = if method.needs_semantic() {
            self.semantic_entries(jobs, &texts, query, top_n)
        } else {
            None
        };

        let mut entries = match (method, lexical, semantic) {
            (Method::Lexical, Some(entries), _) | (Method::Semantic, _, Some(entries)) => entries,
            (Method::Hybrid, Some(lexical), Some(semantic)) => {
                fusion::fuse_simple(&lexical, &semantic)
            }
            (Method::Hybrid, Some(single), None) | (Method::Hybrid, None, Some(single)) => {
                warn!("hybrid running with a single method");
                fusion::relabel(single)
            }
            (Method::Keyword, _, _) => fallback::rank(query, jobs),
            _ => {
                warn!(method = %method, "no vector method available; using keyword matching");
                fallback::rank(query, jobs)
            }
        };

        sort_ranked(&mut entries);
        entries.truncate(top_n);

        info!(
            method = %method,
            records = jobs.len(),
            returned = entries.len(),
            "recommendations ready"
        );
        entries
    }

    fn lexical_entries(
        &self,
        jobs: &[JobRecord],
        texts: &[String],
        query: &str,
        top_n: usize,
    ) -> Option<Vec<Recommendation>> {
        let index = match LexicalIndex::fit(texts, &self.lexical) {
            Ok(index) => index,
            Err(err) => {
                warn!(error = %err, "lexical index unavailable");
                return None;
            }
        };

        Some(
            index
                .query(query)
                .into_iter()
                .take(top_n)
                .map(|(idx, similarity)| {
                    Recommendation::new(
                        &jobs[idx],
                        idx,
                        round_score(f64::from(similarity) * 100.0),
                        LEXICAL_LABEL,
                        true,
                    )
                })
                .collect(),
        )
    }

    fn semantic_entries(
        &self,
        jobs: &[JobRecord],
        texts: &[String],
        query: &str,
        top_n: usize,
    ) -> Option<Vec<Recommendation>> {
        let model = self.model.get()?;
        let timeout = self.model.config().inference_timeout();

        let hits = SemanticIndex::build(model, texts, timeout)
            .and_then(|index| index.query(query, top_n));
        match hits {
            Ok(hits) => Some(
                hits.into_iter()
                    .map(|(idx, score)| {
                        Recommendation::new(
                            &jobs[idx],
                            idx,
                            round_score(f64::from(score)),
                            SEMANTIC_LABEL,
                            true,
                        )
                    })
                    .collect(),
            ),
            Err(err) => {
                warn!(error = %err, "semantic search unavailable for this request");
                None
            }
        }
    }
}
