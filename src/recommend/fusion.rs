//! Score-averaging fusion for hybrid recommendations
//!
//! Lexical and semantic lists are merged by a de-duplication key built from
//! the normalized position and workplace. Each record's fused score is the
//! mean of the scores from the methods that surfaced it:
//!
//! ```text
//! fused(d) = mean { score_m(e) : e in top_n(m), key(e) = key(d) }
//! ```
//!
//! A record found by only one method keeps that method's score; absence from
//! the other list is neutral, not a penalty (union, not intersection). When a
//! list holds several records with the same key, every one of their scores
//! enters the mean.

use std::collections::HashMap;

use crate::corpus::JobRecord;
use crate::recommend::engine::{HYBRID_LABEL, Recommendation, round_score, sort_ranked};
use crate::recommend::normalize::normalize;

/// A single fused result with the per-method scores that produced it.
#[derive(Debug, Clone)]
pub struct HybridResult {
    pub recommendation: Recommendation,
    /// Highest lexical score for the key (if the lexical list contained it)
    pub lexical_score: Option<f64>,
    /// Highest semantic score for the key (if the semantic list contained it)
    pub semantic_score: Option<f64>,
}

/// Grouping key for fusion. Not stored on output entries.
#[must_use]
pub fn fusion_key(job: &JobRecord) -> String {
    format!("{}_{}", normalize(&job.position), normalize(&job.workplace))
}

/// Fuse two ranked lists. Output is sorted by fused score, ties by corpus
/// order. The first entry seen for a key supplies the display fields.
#[must_use]
pub fn fuse_results(lexical: &[Recommendation], semantic: &[Recommendation]) -> Vec<HybridResult> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut results: Vec<HybridResult> = Vec::new();
    let mut contributions: Vec<Vec<f64>> = Vec::new();

    let sources = [(lexical, true), (semantic, false)];
    for (entries, is_lexical) in sources {
        for entry in entries {
            let key = fusion_key(&entry.job);
            let slot = *slots.entry(key).or_insert_with(|| {
                results.push(HybridResult {
                    recommendation: entry.clone(),
                    lexical_score: None,
                    semantic_score: None,
                });
                contributions.push(Vec::new());
                results.len() - 1
            });
            contributions[slot].push(entry.similarity_score);
            let result = &mut results[slot];
            let best = if is_lexical {
                &mut result.lexical_score
            } else {
                &mut result.semantic_score
            };
            *best = Some(best.map_or(entry.similarity_score, |s| s.max(entry.similarity_score)));
        }
    }

    for (result, scores) in results.iter_mut().zip(&contributions) {
        let mean = scores.iter().sum::<f64>() / scores.len().max(1) as f64;
        result.recommendation.similarity_score = round_score(mean);
        result.recommendation.method = HYBRID_LABEL.to_string();
        result.recommendation.ai_ranked = true;
    }

    results.sort_by(|a, b| {
        b.recommendation
            .similarity_score
            .total_cmp(&a.recommendation.similarity_score)
            .then(a.recommendation.corpus_index.cmp(&b.recommendation.corpus_index))
    });
    results
}

/// Fuse and keep only the recommendations.
#[must_use]
pub fn fuse_simple(lexical: &[Recommendation], semantic: &[Recommendation]) -> Vec<Recommendation> {
    fuse_results(lexical, semantic)
        .into_iter()
        .map(|r| r.recommendation)
        .collect()
}

/// Hybrid output when only one method produced a ranking: the same entries
/// relabeled, scores untouched.
#[must_use]
pub fn relabel(entries: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut entries: Vec<Recommendation> = entries
        .into_iter()
        .map(|mut entry| {
            entry.method = HYBRID_LABEL.to_string();
            entry
        })
        .collect();
    sort_ranked(&mut entries);
    entries
}
