//! Section extraction and weighted similarity scoring pipeline

pub mod explain;
pub mod extractor;
pub mod normalize;
pub mod scorer;
pub mod similarity;

pub use explain::ExplanationGenerator;
pub use extractor::{JobSections, ResumeSections, SectionExtractor};
pub use normalize::normalize_scores;
pub use scorer::{MatchResult, PairScorer};
pub use similarity::{cosine_similarity, Field, SectionScores, SimilarityEngine};
