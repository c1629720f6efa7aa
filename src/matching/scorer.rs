//! Scoring one (resume, job) pair end to end

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::input::{truncate_text, TextCache};
use crate::matching::explain::ExplanationGenerator;
use crate::matching::extractor::SectionExtractor;
use crate::matching::similarity::{SectionScores, SimilarityEngine};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Explanation used when a document yields no usable text.
pub const NO_TEXT_EXPLANATION: &str = "Не удалось извлечь текст из документов.";

/// Final outcome for one (resume, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub section_scores: SectionScores,
    pub explanation: String,
}

impl MatchResult {
    fn failed(explanation: String) -> Self {
        Self {
            score: 0.0,
            section_scores: SectionScores::default(),
            explanation,
        }
    }
}

/// Orchestrates text retrieval, section extraction, similarity scoring, and
/// explanation generation for one pair of documents.
pub struct PairScorer {
    text_cache: TextCache,
    provider: Arc<dyn EmbeddingProvider>,
    extractor: SectionExtractor,
    engine: SimilarityEngine,
    explainer: ExplanationGenerator,
    max_text_chars: usize,
}

impl PairScorer {
    pub fn new(text_cache: TextCache, provider: Arc<dyn EmbeddingProvider>, config: &Config) -> Self {
        Self {
            text_cache,
            provider,
            extractor: SectionExtractor::new(),
            engine: SimilarityEngine::new(config.scoring.weights),
            explainer: ExplanationGenerator::new(config.scoring.tiers),
            max_text_chars: config.cache.max_text_chars,
        }
    }

    /// Score a single pair. Never fails: any error while extracting or scoring
    /// is folded into a zero-score result carrying the error text, so one bad
    /// pair cannot abort the rest of a batch.
    pub fn score_pair(&self, resume_path: &Path, job_path: &Path) -> MatchResult {
        let resume_text = match self.text_cache.get_text(resume_path) {
            Ok(text) => text,
            Err(e) => return MatchResult::failed(format!("Ошибка извлечения текста: {}", e)),
        };
        let job_text = match self.text_cache.get_text(job_path) {
            Ok(text) => text,
            Err(e) => return MatchResult::failed(format!("Ошибка извлечения текста: {}", e)),
        };

        let resume_text = truncate_text(&resume_text, self.max_text_chars);
        let job_text = truncate_text(&job_text, self.max_text_chars);

        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            return MatchResult::failed(NO_TEXT_EXPLANATION.to_string());
        }

        let resume_sections = self.extractor.extract_resume_sections(resume_text);
        let job_sections = self.extractor.extract_job_sections(job_text);

        match self
            .engine
            .score_sections(&resume_sections, &job_sections, self.provider.as_ref())
        {
            Ok((total, section_scores)) => MatchResult {
                score: total,
                section_scores,
                explanation: self.explainer.explain(&section_scores, total),
            },
            Err(e) => MatchResult::failed(format!("Ошибка обработки файлов: {}", e)),
        }
    }
}
