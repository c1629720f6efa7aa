//! Input handling: file detection, text extraction, and the text cache

pub mod file_detector;
pub mod text_cache;
pub mod text_extractor;

pub use file_detector::FileType;
pub use text_cache::{truncate_text, TextCache};
pub use text_extractor::{is_valid_pdf, AutoExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
