//! Embedding provider abstraction and the Model2Vec implementation
//!
//! The provider is constructed once at startup and injected into the scoring
//! pipeline; nothing in this crate holds a global model handle.

pub mod cache;
pub mod model2vec;

pub use cache::EmbeddingCache;
pub use model2vec::Model2VecProvider;

use crate::error::Result;

/// A text-to-vector collaborator.
///
/// Implementations must be deterministic: the same text always yields the same
/// vector. Vectors need not be pre-normalized; the similarity engine normalizes
/// before comparing. Empty input must yield a degenerate (zero) vector rather
/// than fail.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed each text, one vector per input in the same order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Length of the vectors produced by [`EmbeddingProvider::embed`].
    fn dimension(&self) -> usize;
}
