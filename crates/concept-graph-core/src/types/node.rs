//! Node representing an atomic concept in the hypergraph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for nodes
pub type NodeId = Uuid;

/// Embedding vector type
pub type EmbeddingVector = Vec<f32>;

/// An atomic concept stored in the hypergraph.
///
/// `data` keeps the original, uncleaned text for display; `normalized` is the
/// cleaned form used for indexing and for composite edge phrases. `seq` is a
/// dense creation-order number used as the row index of the persisted
/// incidence matrix and never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Original display text
    pub data: String,

    /// Normalized text (trimmed, punctuation-stripped, lower-cased)
    pub normalized: String,

    /// Dense creation-order sequence number, starting at 0
    pub seq: usize,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Node {
    /// Create a new node. Sequence numbers are assigned by the entity store.
    pub(crate) fn new(data: impl Into<String>, normalized: impl Into<String>, seq: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            data: data.into(),
            normalized: normalized.into(),
            seq,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new("Python", "python", 0);
        assert_eq!(node.data, "Python");
        assert_eq!(node.normalized, "python");
        assert_eq!(node.seq, 0);
    }

    #[test]
    fn test_node_ids_are_unique() {
        let a = Node::new("a", "a", 0);
        let b = Node::new("a", "a", 1);
        assert_ne!(a.id, b.id);
    }
}
