//! Content-addressed cache of extracted document text
//!
//! Keys are BLAKE3 hashes of the raw file bytes, so identical uploads map to the
//! same entry regardless of filename. The cache stores full text; truncation is
//! applied by consumers.

use crate::error::{Result, ResumeMatcherError};
use crate::input::text_extractor::TextExtractor;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct TextCache {
    dir: PathBuf,
    extractor: Box<dyn TextExtractor>,
}

impl TextCache {
    pub fn new(dir: PathBuf, extractor: Box<dyn TextExtractor>) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, extractor })
    }

    /// Return the extracted text for the document at `path`, reusing a cached
    /// entry when the same byte content was seen before.
    ///
    /// Failed extractions are never cached, so a transient failure can be
    /// retried on a later call with the same content.
    pub fn get_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let hash = blake3::hash(&bytes).to_hex().to_string();
        let cache_path = self.dir.join(format!("{}.txt", hash));

        if cache_path.exists() {
            match fs::read_to_string(&cache_path) {
                Ok(cached) if !cached.trim().is_empty() => {
                    log::debug!("Text cache hit for {}", path.display());
                    return Ok(cached);
                }
                Ok(_) => {}
                Err(e) => log::warn!("Unreadable cache entry {}: {}", cache_path.display(), e),
            }
        }

        let text = self.extractor.extract(path)?;
        if text.trim().is_empty() {
            return Err(ResumeMatcherError::Extraction(format!(
                "No text extracted from {}",
                path.display()
            )));
        }

        // Cache persistence is best-effort: a failed write must never fail the
        // request or alter the returned text.
        if let Err(e) = self.write_entry(&cache_path, &text) {
            log::warn!("Failed to cache text for {}: {}", path.display(), e);
        }

        Ok(text)
    }

    /// Write-then-rename so a partially written entry is never read as valid.
    fn write_entry(&self, cache_path: &Path, text: &str) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(cache_path)
            .map_err(|e| ResumeMatcherError::Io(e.error))?;
        Ok(())
    }
}

/// Truncate text to a character budget, always at the same cut point for the
/// same input.
pub fn truncate_text(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingExtractor {
        calls: Arc<AtomicUsize>,
        output: String,
    }

    impl TextExtractor for CountingExtractor {
        fn extract(&self, _path: &Path) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    struct FailingExtractor;

    impl TextExtractor for FailingExtractor {
        fn extract(&self, path: &Path) -> Result<String> {
            Err(ResumeMatcherError::Extraction(format!(
                "no text layer in {}",
                path.display()
            )))
        }
    }

    fn write_doc(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_second_call_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = TextCache::new(
            dir.path().join("cache"),
            Box::new(CountingExtractor {
                calls: calls.clone(),
                output: "extracted resume text".to_string(),
            }),
        )
        .unwrap();

        let doc = write_doc(dir.path(), "a.pdf", b"%PDF- raw bytes");
        let first = cache.get_text(&doc).unwrap();
        let second = cache.get_text(&doc).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_identical_content_shares_entry_across_paths() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = TextCache::new(
            dir.path().join("cache"),
            Box::new(CountingExtractor {
                calls: calls.clone(),
                output: "same text".to_string(),
            }),
        )
        .unwrap();

        let doc_a = write_doc(dir.path(), "a.pdf", b"%PDF- identical bytes");
        let doc_b = write_doc(dir.path(), "b.pdf", b"%PDF- identical bytes");

        cache.get_text(&doc_a).unwrap();
        cache.get_text(&doc_b).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_extraction_failure_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("cache");
        let cache = TextCache::new(cache_dir.clone(), Box::new(FailingExtractor)).unwrap();

        let doc = write_doc(dir.path(), "a.pdf", b"%PDF- bytes");
        assert!(cache.get_text(&doc).is_err());

        let entries: Vec<_> = fs::read_dir(&cache_dir).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_extraction_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::new(
            dir.path().join("cache"),
            Box::new(CountingExtractor {
                calls: Arc::new(AtomicUsize::new(0)),
                output: "   \n ".to_string(),
            }),
        )
        .unwrap();

        let doc = write_doc(dir.path(), "a.pdf", b"%PDF- bytes");
        assert!(cache.get_text(&doc).is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello", 3), "hel");
        // Cyrillic chars are two bytes each; truncation must count chars.
        assert_eq!(truncate_text("Опыт работы", 4), "Опыт");
    }

    #[test]
    fn test_truncate_is_deterministic() {
        let text = "a".repeat(5000);
        assert_eq!(truncate_text(&text, 4000), truncate_text(&text, 4000));
        assert_eq!(truncate_text(&text, 4000).chars().count(), 4000);
    }
}
