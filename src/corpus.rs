//! Job corpus records and loading.
//!
//! Jobs arrive as a JSON array or JSONL file. Loading maps free-form working
//! mode strings onto the fixed set of modes, parses salary strings such as
//! `"$85,000 USD"`, drops inactive postings and caps the record count.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::config::CorpusConfig;
use crate::error::{JmError, Result};

/// Employment arrangement of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingMode {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
    Remote,
}

impl WorkingMode {
    /// Map a free-form mode string. Unknown values become `FullTime`.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "part_time" | "part time" | "part-time" => Self::PartTime,
            "contract" => Self::Contract,
            "freelance" => Self::Freelance,
            "internship" => Self::Internship,
            "remote" | "work from home" | "wfh" => Self::Remote,
            _ => Self::FullTime,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
            Self::Freelance => "freelance",
            Self::Internship => "internship",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for WorkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or_else(Self::default, |value| Self::from_raw(&value)))
    }
}

/// One job posting as consumed by the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default = "default_workplace")]
    pub workplace: String,
    #[serde(default)]
    pub working_mode: WorkingMode,
    #[serde(default, alias = "duties")]
    pub job_role_and_duties: String,
    #[serde(default, alias = "skills")]
    pub requisite_skill: String,
    #[serde(default, deserialize_with = "deserialize_salary")]
    pub salary_min: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_salary")]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_active", skip_serializing)]
    pub is_active: bool,
}

fn default_position() -> String {
    "Unknown Position".to_string()
}

fn default_workplace() -> String {
    "Unknown Company".to_string()
}

const fn default_active() -> bool {
    true
}

impl JobRecord {
    pub fn new(
        id: impl Into<String>,
        position: impl Into<String>,
        workplace: impl Into<String>,
        duties: impl Into<String>,
        skills: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position: position.into(),
            workplace: workplace.into(),
            working_mode: WorkingMode::default(),
            job_role_and_duties: duties.into(),
            requisite_skill: skills.into(),
            salary_min: None,
            salary_max: None,
            location: String::new(),
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_working_mode(mut self, mode: WorkingMode) -> Self {
        self.working_mode = mode;
        self
    }

    #[must_use]
    pub fn with_salary(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.salary_min = min;
        self.salary_max = max;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Space-joined text fields in fixed order: position, workplace,
    /// working mode, duties, skills.
    #[must_use]
    pub fn composite_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.position,
            self.workplace,
            self.working_mode.as_str(),
            self.job_role_and_duties,
            self.requisite_skill
        )
    }
}

/// Parse a salary string, tolerating currency symbols and separators.
#[must_use]
pub fn parse_salary(raw: &str) -> Option<f64> {
    let cleaned = raw
        .replace('$', "")
        .replace(',', "")
        .replace("USD", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn deserialize_salary<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Salary {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Salary>::deserialize(deserializer)? {
        Some(Salary::Number(value)) if value.is_finite() => Some(value),
        Some(Salary::Text(raw)) => parse_salary(&raw),
        _ => None,
    })
}

/// Load jobs from a JSON array or JSONL file.
pub fn load_jobs(path: &Path, config: &CorpusConfig) -> Result<Vec<JobRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        JmError::InvalidCorpus(format!("read {}: {err}", path.display()))
    })?;
    let jsonl = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));
    let jobs = parse_jobs(&raw, jsonl, config)?;
    info!(path = %path.display(), records = jobs.len(), "loaded job corpus");
    Ok(jobs)
}

/// Parse job records. JSONL is assumed when `jsonl` is set or the input does
/// not start with `[`.
pub fn parse_jobs(raw: &str, jsonl: bool, config: &CorpusConfig) -> Result<Vec<JobRecord>> {
    let trimmed = raw.trim_start();
    let records: Vec<JobRecord> = if jsonl || !trimmed.starts_with('[') {
        let mut records = Vec::new();
        for (line_no, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<JobRecord>(line) {
                Ok(record) => records.push(record),
                Err(err) => warn!(line = line_no + 1, error = %err, "skipping malformed job"),
            }
        }
        records
    } else {
        serde_json::from_str(trimmed)
            .map_err(|err| JmError::InvalidCorpus(format!("parse job array: {err}")))?
    };

    let total = records.len();
    let jobs: Vec<JobRecord> = records
        .into_iter()
        .filter(|job| config.include_inactive || job.is_active)
        .take(config.limit)
        .enumerate()
        .map(|(idx, mut job)| {
            if job.id.trim().is_empty() {
                job.id = format!("job-{}", idx + 1);
            }
            job
        })
        .collect();

    debug!(total, kept = jobs.len(), limit = config.limit, "filtered job corpus");
    Ok(jobs)
}
