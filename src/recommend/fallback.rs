//! Keyword-overlap fallback matcher.
//!
//! Used when neither vector method is available, or when keyword matching is
//! requested explicitly. Never fails.

use tracing::debug;

use crate::corpus::JobRecord;
use crate::recommend::engine::{FALLBACK_LABEL, Recommendation, round_score, sort_ranked};
use crate::recommend::skills::extract_skills;

/// Score assigned to every job when the resume yields no known skills.
pub const NO_SKILL_SCORE: f64 = 50.0;
/// Constant added to the match percentage.
pub const BASE_BONUS: f64 = 20.0;
/// Cap on keyword scores.
pub const MAX_SCORE: f64 = 95.0;

/// `min(95, matches / total * 100 + 20)`, or 50 when `total` is zero.
#[must_use]
pub fn keyword_score(matches: usize, total: usize) -> f64 {
    if total == 0 {
        return NO_SKILL_SCORE;
    }
    (matches as f64 / total as f64)
        .mul_add(100.0, BASE_BONUS)
        .min(MAX_SCORE)
}

/// Rank every job by how many resume skills its composite text mentions.
#[must_use]
pub fn rank(resume_text: &str, jobs: &[JobRecord]) -> Vec<Recommendation> {
    let skills = extract_skills(resume_text);

    let mut entries: Vec<Recommendation> = jobs
        .iter()
        .enumerate()
        .map(|(idx, job)| {
            let text = job.composite_text().to_lowercase();
            let matches = skills.iter().filter(|skill| text.contains(*skill)).count();
            let mut entry = Recommendation::new(
                job,
                idx,
                round_score(keyword_score(matches, skills.len())),
                FALLBACK_LABEL,
                false,
            );
            entry.skill_matches = Some(matches);
            entry
        })
        .collect();

    sort_ranked(&mut entries);
    debug!(
        jobs = jobs.len(),
        skills = skills.len(),
        "keyword fallback ranking complete"
    );
    entries
}
