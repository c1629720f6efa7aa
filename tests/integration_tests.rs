//! Integration tests for the matching pipeline

use resume_matcher::config::Config;
use resume_matcher::embedding::EmbeddingProvider;
use resume_matcher::error::Result;
use resume_matcher::input::{PlainTextExtractor, TextCache};
use resume_matcher::matching::scorer::NO_TEXT_EXPLANATION;
use resume_matcher::matching::PairScorer;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Deterministic embedding stub: identical text always maps to an identical
/// vector, so self-similarity is exactly 1.0.
struct StubProvider {
    calls: AtomicUsize,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl EmbeddingProvider for StubProvider {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| {
                let hash = blake3::hash(t.trim().as_bytes());
                hash.as_bytes()[..16]
                    .iter()
                    .map(|b| *b as f32 + 1.0)
                    .collect()
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        16
    }
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn build_scorer(dir: &TempDir) -> PairScorer {
    let mut config = Config::default();
    config.cache.cache_dir = dir.path().join("cache");

    let text_cache = TextCache::new(config.text_cache_dir(), Box::new(PlainTextExtractor)).unwrap();
    PairScorer::new(text_cache, Arc::new(StubProvider::new()), &config)
}

#[test]
fn test_matching_title_scores_full_marks() {
    let dir = TempDir::new().unwrap();
    let scorer = build_scorer(&dir);

    let resume = write_fixture(
        dir.path(),
        "resume.txt",
        "Желаемая позиция: Backend Engineer\nНавыки: Rust, SQL",
    );
    let job = write_fixture(
        dir.path(),
        "job.txt",
        "Название вакансии: Backend Engineer\nТребования: опыт разработки",
    );

    let result = scorer.score_pair(&resume, &job);

    assert_eq!(result.section_scores.title, 100.0);
    // Title weight is 0.5, so a perfect title match alone carries at least 50.
    assert!(result.score >= 50.0);
    assert!(!result.explanation.is_empty());
}

#[test]
fn test_position_extracted_from_leading_lines() {
    let dir = TempDir::new().unwrap();
    let scorer = build_scorer(&dir);

    let resume = write_fixture(
        dir.path(),
        "resume.txt",
        "тел: +7 900 000-00-00\nemail: candidate@example.com\nSenior Data Analyst\n\
         Навыки: SQL, Python, отчётность",
    );
    let job = write_fixture(
        dir.path(),
        "job.txt",
        "Название вакансии: Senior Data Analyst\nТребования: SQL",
    );

    let result = scorer.score_pair(&resume, &job);

    // The fallback found "Senior Data Analyst", which matches the job title.
    assert_eq!(result.section_scores.title, 100.0);
}

#[test]
fn test_empty_document_yields_zero_score_without_panicking() {
    let dir = TempDir::new().unwrap();
    let scorer = build_scorer(&dir);

    let resume = write_fixture(dir.path(), "resume.txt", "   \n  ");
    let job = write_fixture(
        dir.path(),
        "job.txt",
        "Название вакансии: Backend Engineer\nТребования: Rust",
    );

    let result = scorer.score_pair(&resume, &job);

    assert_eq!(result.score, 0.0);
    assert_eq!(result.section_scores.title, 0.0);
    assert!(result.explanation.contains("Ошибка извлечения текста"));
}

#[test]
fn test_unstructured_documents_yield_no_match_explanation() {
    let dir = TempDir::new().unwrap();
    let scorer = build_scorer(&dir);

    let resume = write_fixture(dir.path(), "resume.txt", "lowercase words only here");
    let job = write_fixture(dir.path(), "job.txt", "nothing that looks like a posting");

    let result = scorer.score_pair(&resume, &job);

    assert_eq!(result.score, 0.0);
    assert!(
        result.explanation.contains("Совпадений не обнаружено")
            || result.explanation == NO_TEXT_EXPLANATION
    );
}

#[test]
fn test_failing_pair_does_not_abort_batch() {
    let dir = TempDir::new().unwrap();
    let scorer = build_scorer(&dir);

    let broken = write_fixture(dir.path(), "broken.txt", " ");
    let good = write_fixture(
        dir.path(),
        "good.txt",
        "Желаемая позиция: Backend Engineer\nНавыки: Rust",
    );
    let job = write_fixture(
        dir.path(),
        "job.txt",
        "Название вакансии: Backend Engineer\nТребования: Rust",
    );

    let failed = scorer.score_pair(&broken, &job);
    let succeeded = scorer.score_pair(&good, &job);

    assert_eq!(failed.score, 0.0);
    assert!(succeeded.score > 0.0);
}

#[test]
fn test_repeated_scoring_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let scorer = build_scorer(&dir);

    let resume = write_fixture(
        dir.path(),
        "resume.txt",
        "Желаемая позиция: Backend Engineer\nОбо мне: разработчик\nНавыки: Rust, SQL\n\
         Опыт работы: 5 лет\nОбразование: МГУ",
    );
    let job = write_fixture(
        dir.path(),
        "job.txt",
        "Название вакансии: Backend Engineer\nТребования: Высшее образование, Rust.\n\
         Обязанности: разработка сервисов",
    );

    let first = scorer.score_pair(&resume, &job);
    let second = scorer.score_pair(&resume, &job);

    assert_eq!(first, second);
}
