//! Brute-force flat L2 index.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{GraphError, GraphResult};
use crate::traits::VectorIndex;

/// In-memory exact nearest-neighbor index.
///
/// Linear scan over all stored vectors using squared Euclidean distance, the
/// flat-L2 convention. Append-only: slot ids equal insertion order and never
/// change.
///
/// # Performance
///
/// - add: O(1)
/// - search: O(n * d) where n = vectors, d = dimension
///
/// Exact search keeps the dedup threshold semantics strict; an approximate
/// backend would trade that away for scale.
#[derive(Debug)]
pub struct FlatIndex {
    vectors: RwLock<Vec<Vec<f32>>>,
    dimension: usize,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: RwLock::new(Vec::new()),
            dimension,
        }
    }

    fn check_dimension(&self, vector: &[f32]) -> GraphResult<()> {
        if vector.len() != self.dimension {
            return Err(GraphError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }

    fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
    }
}

#[async_trait]
impl VectorIndex for FlatIndex {
    async fn add(&self, vector: &[f32]) -> GraphResult<usize> {
        self.check_dimension(vector)?;
        let mut vectors = self.vectors.write().await;
        let slot = vectors.len();
        vectors.push(vector.to_vec());
        Ok(slot)
    }

    async fn search(&self, query: &[f32], k: usize) -> GraphResult<Vec<(usize, f32)>> {
        self.check_dimension(query)?;
        let vectors = self.vectors.read().await;

        let mut hits: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(slot, vector)| (slot, Self::squared_l2(query, vector)))
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        hits.truncate(k);
        Ok(hits)
    }

    async fn len(&self) -> usize {
        self.vectors.read().await.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
