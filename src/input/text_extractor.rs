//! Text extraction from uploaded documents

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use std::fs;
use std::path::Path;

/// Minimum byte count for a file to even be considered a PDF.
const MIN_PDF_BYTES: u64 = 10;

pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeMatcherError::Extraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        if text.trim().is_empty() {
            return Err(ResumeMatcherError::Extraction(format!(
                "No text extracted from '{}'",
                path.display()
            )));
        }

        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)?;
        Ok(content)
    }
}

/// Routes to the extractor matching the file extension.
pub struct AutoExtractor;

impl TextExtractor for AutoExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match FileType::from_extension(extension) {
            FileType::Pdf => {
                log::info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path)
            }
            FileType::Text => {
                log::info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path)
            }
            FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }
}

/// Check that a file looks like a PDF: exists, carries a minimum size, and
/// starts with the `%PDF-` magic header.
pub fn is_valid_pdf(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if metadata.len() < MIN_PDF_BYTES {
        return false;
    }

    match fs::read(path) {
        Ok(bytes) => bytes.starts_with(b"%PDF-"),
        Err(_) => false,
    }
}
