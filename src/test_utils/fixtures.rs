//! Job corpora and stub embedding models for tests and benchmarks.

use std::time::Duration;

use crate::corpus::{JobRecord, WorkingMode};
use crate::error::{JmError, Result};
use crate::recommend::embeddings::Embedder;
use crate::recommend::normalize::normalize;

/// Resume text used by the three-job ranking scenario.
#[must_use]
pub const fn scenario_query() -> &'static str {
    "Experienced Python developer with Django and machine learning background"
}

/// Three postings: Python backend, frontend design, machine learning.
#[must_use]
pub fn sample_jobs() -> Vec<JobRecord> {
    vec![
        JobRecord::new(
            "job-a",
            "Python Backend Engineer",
            "Initech",
            "Build REST APIs and backend services",
            "Django, REST APIs",
        )
        .with_salary(Some(90_000.0), Some(120_000.0))
        .with_location("Berlin"),
        JobRecord::new(
            "job-b",
            "Frontend Designer",
            "Pixel Studio",
            "Design user interfaces and style guides",
            "Figma, CSS",
        )
        .with_working_mode(WorkingMode::Contract),
        JobRecord::new(
            "job-c",
            "Machine Learning Engineer",
            "Deep Labs",
            "Train and deploy models",
            "Python, TensorFlow",
        )
        .with_working_mode(WorkingMode::Remote),
    ]
}

/// `count` synthetic postings with distinct position/workplace pairs.
#[must_use]
pub fn synthetic_jobs(count: usize) -> Vec<JobRecord> {
    const ROLES: &[&str] = &[
        "Backend Engineer",
        "Data Scientist",
        "DevOps Engineer",
        "Product Designer",
        "QA Analyst",
        "Mobile Developer",
    ];
    const STACKS: &[&str] = &[
        "Python, Django, PostgreSQL",
        "Java, Spring, Kafka",
        "JavaScript, React, Node.js",
        "Docker, Kubernetes, AWS",
        "Excel, Tableau, SQL",
        "Swift, Kotlin, Firebase",
    ];

    (0..count)
        .map(|i| {
            JobRecord::new(
                format!("job-{i}"),
                ROLES[i % ROLES.len()],
                format!("Company {i}"),
                format!("Deliver projects for team {} with ownership", i % 7),
                STACKS[(i / ROLES.len()) % STACKS.len()],
            )
        })
        .collect()
}

/// The sample corpus as a JSON array string.
#[must_use]
pub fn sample_jobs_json() -> String {
    serde_json::to_string_pretty(&sample_jobs()).unwrap_or_default()
}

/// Embedder with one axis per group of words. A text gets a unit weight on
/// every axis one of whose words it contains, so tests can fix the semantic
/// ranking independently of TF-IDF.
pub struct ConceptEmbedder {
    axes: Vec<Vec<String>>,
}

impl ConceptEmbedder {
    #[must_use]
    pub fn new(axes: &[&[&str]]) -> Self {
        Self {
            axes: axes
                .iter()
                .map(|words| words.iter().map(|w| (*w).to_string()).collect())
                .collect(),
        }
    }
}

impl Embedder for ConceptEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let normalized = normalize(text);
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let mut embedding: Vec<f32> = self
            .axes
            .iter()
            .map(|axis| {
                if axis.iter().any(|w| words.contains(&w.as_str())) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(embedding)
    }

    fn dims(&self) -> usize {
        self.axes.len()
    }

    fn name(&self) -> &str {
        "concept"
    }
}

/// Embedder whose every call fails.
pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(JmError::Embedding("simulated inference failure".to_string()))
    }

    fn dims(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Embedder that reports more dimensions than it produces.
pub struct WrongDimsEmbedder;

impl Embedder for WrongDimsEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0; 4])
    }

    fn dims(&self) -> usize {
        8
    }

    fn name(&self) -> &str {
        "wrong-dims"
    }
}

/// Embedder that sleeps before answering.
pub struct SlowEmbedder {
    delay: Duration,
}

impl SlowEmbedder {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Embedder for SlowEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        std::thread::sleep(self.delay);
        Ok(vec![0.0; 4])
    }

    fn dims(&self) -> usize {
        4
    }

    fn name(&self) -> &str {
        "slow"
    }
}
