//! Text embedding trait.

use async_trait::async_trait;

use crate::error::GraphResult;
use crate::types::EmbeddingVector;

/// Converts text to a fixed-dimension numeric vector.
///
/// Implementations must be deterministic for identical input, and their
/// dimension must stay fixed across the lifetime of a graph. Semantically
/// similar strings are expected to produce vectors with small distance.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> GraphResult<EmbeddingVector>;

    /// The dimension of produced vectors.
    fn dimension(&self) -> usize;
}
