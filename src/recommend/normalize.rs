//! Text normalization shared by the lexical and semantic pipelines.

/// Lower-case, drop every character that is neither alphanumeric nor
/// whitespace, and trim.
///
/// Deterministic and idempotent; empty input yields an empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.trim().to_string()
}
