//! Authoritative entity storage for nodes and hyperedges.

use std::collections::HashMap;

use crate::types::{EdgeId, Hyperedge, Node, NodeId};

/// Owns all node and hyperedge records, keyed by id.
///
/// Assigns node sequence numbers (dense, contiguous, creation order) and
/// records edge insertion order; both orderings index the persisted
/// incidence matrix. The store performs no deduplication (fuzzy node dedup
/// is the hypergraph's job via the similarity index) and exposes no
/// deletion or mutation.
#[derive(Debug, Default)]
pub struct EntityStore {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Hyperedge>,
    node_order: Vec<NodeId>,
    edge_order: Vec<EdgeId>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a node, assigning the next sequence number.
    pub fn create_node(&mut self, data: &str, normalized: &str) -> NodeId {
        let seq = self.node_order.len();
        let node = Node::new(data, normalized, seq);
        let id = node.id;
        self.node_order.push(id);
        self.nodes.insert(id, node);
        id
    }

    /// Create and store a hyperedge. Never deduplicates.
    pub fn create_edge(
        &mut self,
        sources: Vec<NodeId>,
        targets: Vec<NodeId>,
        relation: &str,
    ) -> EdgeId {
        let edge = Hyperedge::new(sources, targets, relation);
        let id = edge.id;
        self.edge_order.push(id);
        self.edges.insert(id, edge);
        id
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Hyperedge> {
        self.edges.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    /// Nodes in creation order (ascending sequence number).
    pub fn nodes_in_order(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Edges in insertion order (incidence matrix column order).
    pub fn edges_in_order(&self) -> impl Iterator<Item = &Hyperedge> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }
}
