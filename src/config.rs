use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{JmError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub lexical: LexicalConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl Config {
    /// Load configuration: defaults, then global and project files (or a
    /// single explicit file), then `JM_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("JM_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(JmError::MissingConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("jm/config.toml"))
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&project_root.join("jm.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| JmError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| JmError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.recommend {
            self.recommend.merge(patch);
        }
        if let Some(patch) = patch.lexical {
            self.lexical.merge(patch);
        }
        if let Some(patch) = patch.semantic {
            self.semantic.merge(patch);
        }
        if let Some(patch) = patch.corpus {
            self.corpus.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("JM_RECOMMEND_METHOD") {
            self.recommend.method = value;
        }
        if let Some(value) = env_usize("JM_RECOMMEND_TOP_N")? {
            self.recommend.top_n = value;
        }

        if let Some(value) = env_usize("JM_LEXICAL_MAX_FEATURES")? {
            self.lexical.max_features = value;
        }
        if let Some(value) = env_usize("JM_LEXICAL_NGRAM_MAX")? {
            self.lexical.ngram_max = value;
        }

        if let Some(value) = env_bool("JM_SEMANTIC_ENABLED") {
            self.semantic.enabled = value;
        }
        if let Some(value) = env_string("JM_SEMANTIC_BACKEND") {
            self.semantic.backend = value;
        }
        if let Some(value) = env_usize("JM_SEMANTIC_DIMS")? {
            self.semantic.dims = value;
        }
        if let Some(value) = env_string("JM_SEMANTIC_MODEL_PATH") {
            self.semantic.model_path = if value.is_empty() { None } else { Some(value) };
        }
        if let Some(value) = env_u64("JM_SEMANTIC_TIMEOUT_MS")? {
            self.semantic.inference_timeout_ms = value;
        }

        if let Some(value) = env_usize("JM_CORPUS_LIMIT")? {
            self.corpus.limit = value;
        }
        if let Some(value) = env_bool("JM_CORPUS_INCLUDE_INACTIVE") {
            self.corpus.include_inactive = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Default method when none is given: lexical, semantic, hybrid, keyword
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub top_n: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            method: "hybrid".to_string(),
            top_n: 20,
        }
    }
}

impl RecommendConfig {
    fn merge(&mut self, patch: RecommendPatch) {
        if let Some(value) = patch.method {
            self.method = value;
        }
        if let Some(value) = patch.top_n {
            self.top_n = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalConfig {
    #[serde(default)]
    pub max_features: usize,
    #[serde(default)]
    pub ngram_max: usize,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            ngram_max: 2,
        }
    }
}

impl LexicalConfig {
    fn merge(&mut self, patch: LexicalPatch) {
        if let Some(value) = patch.max_features {
            self.max_features = value;
        }
        if let Some(value) = patch.ngram_max {
            self.ngram_max = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Embedding backend: minilm, static, hash, none
    #[serde(default)]
    pub backend: String,
    #[serde(default)]
    pub dims: usize,
    /// Word-vector file for `static`, model cache directory for `minilm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    /// 0 disables the timeout
    #[serde(default)]
    pub inference_timeout_ms: u64,
}

/// The sentence model when compiled in, otherwise the offline hash stub.
#[cfg(feature = "fastembed")]
pub const DEFAULT_SEMANTIC_BACKEND: &str = "minilm";
#[cfg(not(feature = "fastembed"))]
pub const DEFAULT_SEMANTIC_BACKEND: &str = "hash";

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: DEFAULT_SEMANTIC_BACKEND.to_string(),
            dims: 384,
            model_path: None,
            inference_timeout_ms: 30_000,
        }
    }
}

impl SemanticConfig {
    fn merge(&mut self, patch: SemanticPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.backend {
            self.backend = value;
        }
        if let Some(value) = patch.dims {
            self.dims = value;
        }
        if let Some(value) = patch.model_path {
            self.model_path = Some(value);
        }
        if let Some(value) = patch.inference_timeout_ms {
            self.inference_timeout_ms = value;
        }
    }

    #[must_use]
    pub const fn inference_timeout(&self) -> Option<Duration> {
        if self.inference_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.inference_timeout_ms))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Maximum number of job records loaded from a corpus file
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub include_inactive: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            limit: 500,
            include_inactive: false,
        }
    }
}

impl CorpusConfig {
    fn merge(&mut self, patch: CorpusPatch) {
        if let Some(value) = patch.limit {
            self.limit = value;
        }
        if let Some(value) = patch.include_inactive {
            self.include_inactive = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub recommend: Option<RecommendPatch>,
    pub lexical: Option<LexicalPatch>,
    pub semantic: Option<SemanticPatch>,
    pub corpus: Option<CorpusPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RecommendPatch {
    pub method: Option<String>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LexicalPatch {
    pub max_features: Option<usize>,
    pub ngram_max: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SemanticPatch {
    pub enabled: Option<bool>,
    pub backend: Option<String>,
    pub dims: Option<usize>,
    pub model_path: Option<String>,
    pub inference_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CorpusPatch {
    pub limit: Option<usize>,
    pub include_inactive: Option<bool>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.trim().parse::<usize>().map(Some).map_err(|err| {
            JmError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.trim().parse::<u64>().map(Some).map_err(|err| {
            JmError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
