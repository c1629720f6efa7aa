//! Embeddings generation using Model2Vec

use crate::config::Config;
use crate::embedding::{EmbeddingCache, EmbeddingProvider};
use crate::error::{Result, ResumeMatcherError};
use model2vec_rs::model::StaticModel;

pub struct Model2VecProvider {
    model: StaticModel,
    cache: Option<EmbeddingCache>,
    dimension: usize,
    model_name: String,
}

impl Model2VecProvider {
    pub fn load(repo_or_path: &str, cache: Option<EmbeddingCache>) -> Result<Self> {
        log::info!("Loading Model2Vec embedding model from: {}", repo_or_path);

        let model = StaticModel::from_pretrained(
            repo_or_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| ResumeMatcherError::Embedding(format!("Failed to load model: {}", e)))?;

        // Probe the output width once so empty inputs can be mapped to a
        // zero vector of the right dimension.
        let dimension = model.encode_single("dimension probe").len();
        if dimension == 0 {
            return Err(ResumeMatcherError::Embedding(
                "Model produced zero-dimensional embeddings".to_string(),
            ));
        }

        log::info!("Model loaded successfully ({} dimensions)", dimension);

        Ok(Self {
            model,
            cache,
            dimension,
            model_name: repo_or_path.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = EmbeddingCache::new(config.embedding_cache_dir())?;
        Self::load(&config.embedding_model_path(), Some(cache))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let text = text.trim();
        if text.is_empty() {
            return vec![0.0; self.dimension];
        }

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(text) {
                if cached.len() == self.dimension {
                    return cached;
                }
                log::warn!("Cached embedding has stale dimension, recomputing");
            }
        }

        let embedding = self.model.encode_single(text);
        if let Some(cache) = &self.cache {
            cache.put(text, &embedding);
        }
        embedding
    }
}

impl EmbeddingProvider for Model2VecProvider {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
