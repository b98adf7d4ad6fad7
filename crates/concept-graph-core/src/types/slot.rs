//! Tagged slot entries for the shared similarity index.

use serde::{Deserialize, Serialize};

use super::{EdgeId, NodeId};

/// What a similarity-index slot resolves to.
///
/// The index is intentionally shared between both entity kinds so one query
/// can surface concepts and relationships ranked by the same distance
/// metric. Each slot holds exactly one entity reference, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexSlot {
    Node(NodeId),
    Edge(EdgeId),
}

impl IndexSlot {
    /// The node id, if this slot holds a node.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            IndexSlot::Node(id) => Some(*id),
            IndexSlot::Edge(_) => None,
        }
    }

    /// The edge id, if this slot holds an edge.
    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            IndexSlot::Node(_) => None,
            IndexSlot::Edge(id) => Some(*id),
        }
    }
}
