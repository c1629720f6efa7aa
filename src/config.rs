//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub cache: CacheConfig,
    pub scoring: ScoringConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub cache_dir: PathBuf,
    /// Character budget applied to extracted text before scoring.
    pub max_text_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: SectionWeights,
    pub tiers: TierThresholds,
}

/// Per-section weights for the aggregate score. Must sum to 1.0.
///
/// The default split (0.5/0.2/0.2/0.1) is tuned policy, not a structural
/// requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionWeights {
    pub title: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

/// Aggregate-score cutoffs for the qualitative match tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThresholds {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Uploads smaller than this are rejected as empty or corrupted.
    pub min_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher");

        Self {
            models: ModelConfig {
                models_dir: base_dir.join("models"),
                embedding_model: "minishlab/M2V_base_output".to_string(),
            },
            cache: CacheConfig {
                cache_dir: base_dir.join("cache"),
                max_text_chars: 4000,
            },
            scoring: ScoringConfig {
                weights: SectionWeights::default(),
                tiers: TierThresholds::default(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                min_upload_bytes: 50,
            },
        }
    }
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            title: 0.5,
            skills: 0.2,
            experience: 0.2,
            education: 0.1,
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 60.0,
            good: 40.0,
            average: 20.0,
        }
    }
}

impl SectionWeights {
    pub fn sum(&self) -> f64 {
        self.title + self.skills + self.experience + self.education
    }

    pub fn validate(&self) -> Result<()> {
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(ResumeMatcherError::Configuration(format!(
                "Section weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        let entries = [self.title, self.skills, self.experience, self.education];
        if entries.iter().any(|w| *w <= 0.0 || *w > 1.0) {
            return Err(ResumeMatcherError::Configuration(
                "Each section weight must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration, writing the defaults on first run.
    pub fn load(path_override: Option<&Path>) -> Result<Self> {
        let config_path = match path_override {
            Some(path) => path.to_path_buf(),
            None => Self::config_path(),
        };

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e))
            })?
        } else {
            let config = Self::default();
            config.save(&config_path)?;
            config
        };

        config.scoring.weights.validate()?;
        Ok(config)
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn text_cache_dir(&self) -> PathBuf {
        self.cache.cache_dir.join("texts")
    }

    pub fn embedding_cache_dir(&self) -> PathBuf {
        self.cache.cache_dir.join("embeddings")
    }

    /// Resolve the embedding model to a local directory if one exists under
    /// `models_dir`, otherwise pass the identifier through for hub download.
    pub fn embedding_model_path(&self) -> String {
        let local = self.models.models_dir.join(&self.models.embedding_model);
        if local.exists() {
            local.to_string_lossy().to_string()
        } else {
            self.models.embedding_model.clone()
        }
    }
}
