//! Fixed-vocabulary skill extraction for keyword matching.

/// Technical terms recognized in resumes and postings.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "python", "java", "javascript", "react", "angular", "vue", "node.js", "express",
    "sql", "mysql", "postgresql", "mongodb", "aws", "azure", "docker", "kubernetes",
    "git", "github", "html", "css", "bootstrap", "jquery", "php", "c#", "c++",
    "machine learning", "ai", "artificial intelligence", "data science", "analytics",
    "excel", "powerbi", "tableau", "r", "matlab", "tensorflow", "pytorch",
    "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "jupyter",
];

/// Soft-skill terms recognized in resumes and postings.
pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "project management",
    "agile", "scrum", "kanban", "customer service", "sales", "marketing",
    "research", "analysis", "planning", "organization", "time management",
];

/// Skills from both vocabularies that occur as substrings of the
/// lower-cased text, in vocabulary order.
///
/// Matching is literal: short terms such as `r` or `ai` match inside longer
/// words. Punctuation is kept so `c++`, `c#` and `node.js` stay reachable.
#[must_use]
pub fn extract_skills(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    TECHNICAL_SKILLS
        .iter()
        .chain(SOFT_SKILLS)
        .copied()
        .filter(|skill| lowered.contains(skill))
        .collect()
}
