//! Vector index trait for nearest-neighbor search.

use async_trait::async_trait;

use crate::error::GraphResult;

/// Append-only nearest-neighbor search structure over fixed-dimension
/// vectors.
///
/// Slot ids are implicit: `add` assigns the next sequential slot (insertion
/// order) and the index is never rewritten, so previously issued slot ids
/// stay valid for the lifetime of the graph instance.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Append a vector, returning its assigned slot id.
    async fn add(&self, vector: &[f32]) -> GraphResult<usize>;

    /// Return up to `k` nearest slots to `query` as `(slot_id, distance)`
    /// pairs, non-negative distances in ascending order. Ties resolve by
    /// slot id (insertion order).
    async fn search(&self, query: &[f32], k: usize) -> GraphResult<Vec<(usize, f32)>>;

    /// Number of vectors in the index.
    async fn len(&self) -> usize;

    /// The dimension of vectors in this index.
    fn dimension(&self) -> usize;
}
