//! Directed hyperedge relating groups of concepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NodeId;

/// Unique identifier for hyperedges
pub type EdgeId = Uuid;

/// A directed N-to-M relationship between concept groups.
///
/// Sources and targets are non-owning references into the entity store; the
/// store is the sole owner of nodes and a node may be referenced by many
/// edges. Both sides are non-empty, deduplicated, and mutually disjoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hyperedge {
    /// Unique identifier
    pub id: EdgeId,

    /// Source node references, in insertion order
    pub sources: Vec<NodeId>,

    /// Target node references, in insertion order
    pub targets: Vec<NodeId>,

    /// Relation label, non-blank
    pub relation: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Hyperedge {
    pub(crate) fn new(
        sources: Vec<NodeId>,
        targets: Vec<NodeId>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sources,
            targets,
            relation: relation.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the given node participates in this edge on either side.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.sources.contains(id) || self.targets.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_checks_both_sides() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let edge = Hyperedge::new(vec![a], vec![b], "related_to");
        assert!(edge.contains(&a));
        assert!(edge.contains(&b));
        assert!(!edge.contains(&c));
    }
}
