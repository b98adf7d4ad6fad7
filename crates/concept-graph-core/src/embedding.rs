//! Deterministic hash-based embedding provider.
//!
//! Provides reproducible embeddings without requiring model files or a GPU.
//! Identical inputs map to identical vectors, distinct inputs land in
//! effectively unrelated directions, which is all the dedup lookup and the
//! tests need. Model-backed providers implement [`TextEmbedder`] the same
//! way.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::error::GraphResult;
use crate::traits::TextEmbedder;
use crate::types::EmbeddingVector;

/// Hash-based embedding provider.
///
/// Each dimension is derived by hashing `(text, dimension_index)`, then the
/// whole vector is L2-normalized. Deterministic across processes.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a provider producing vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn generate(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0f32; self.dimension];
        for (i, slot) in vector.iter_mut().enumerate() {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            i.hash(&mut hasher);
            let raw = hasher.finish();
            // Map the hash onto [-1, 1]
            *slot = ((raw as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl TextEmbedder for HashEmbedder {
    async fn embed(&self, text: &str) -> GraphResult<EmbeddingVector> {
        let vector = self.generate(text);
        tracing::trace!(len = text.len(), dimension = self.dimension, "embedded text");
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed("python").await.unwrap();
        let b = embedder.embed("python").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_embedding_has_requested_dimension() {
        let embedder = HashEmbedder::new(128);
        let v = embedder.embed("anything").await.unwrap();
        assert_eq!(v.len(), 128);
        assert_eq!(embedder.dimension(), 128);
    }

    #[tokio::test]
    async fn test_embedding_is_normalized() {
        let embedder = HashEmbedder::new(64);
        let v = embedder.embed("normalize me").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_distinct_texts_are_far_apart() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed("python").await.unwrap();
        let b = embedder.embed("web framework").await.unwrap();
        let dist: f32 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum();
        assert!(dist > 0.01, "distance {} too small", dist);
    }
}
