//! On-disk embedding cache keyed by text hash

use crate::error::{Result, ResumeMatcherError};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Caches computed embedding vectors as JSON files named by the BLAKE3 hash of
/// the embedded text. Values are a pure function of the key, so concurrent
/// writers racing on the same entry are harmless (last writer wins).
pub struct EmbeddingCache {
    dir: PathBuf,
}

impl EmbeddingCache {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, text: &str) -> PathBuf {
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        self.dir.join(format!("{}.json", hash))
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        let path = self.entry_path(text);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(vector) => Some(vector),
            Err(e) => {
                log::warn!("Discarding corrupt embedding cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Best-effort store; failures are logged and swallowed.
    pub fn put(&self, text: &str, vector: &[f32]) {
        if let Err(e) = self.write_entry(text, vector) {
            log::warn!("Failed to cache embedding: {}", e);
        }
    }

    fn write_entry(&self, text: &str, vector: &[f32]) -> Result<()> {
        let content = serde_json::to_string(vector)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(self.entry_path(text))
            .map_err(|e| ResumeMatcherError::Io(e.error))?;
        Ok(())
    }
}
