//! Retrieval formatting over the hypergraph.
//!
//! Turns free-text queries into a flat, deduplicated knowledge listing:
//! one bullet per matched relationship, then one bullet per matched concept
//! not already shown inside a relationship.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::graph::Hypergraph;
use crate::normalize::{clean_text, is_blank, validate_concepts};
use crate::types::{EdgeId, NodeId};

/// RAG-style facade over a [`Hypergraph`]: ingest concept relationships,
/// retrieve formatted knowledge summaries.
pub struct RagSystem {
    graph: Hypergraph,
}

impl RagSystem {
    pub fn new(graph: Hypergraph) -> Self {
        Self { graph }
    }

    /// The underlying hypergraph (for snapshots and inspection).
    pub fn graph(&self) -> &Hypergraph {
        &self.graph
    }

    /// Mutable access to the underlying hypergraph.
    pub fn graph_mut(&mut self) -> &mut Hypergraph {
        &mut self.graph
    }

    /// Ingest an N-to-M relationship: every entry of `concepts` relates to
    /// every entry of `related_concepts` under `relation`.
    ///
    /// An empty side is a deliberate silent no-op (`Ok(None)`), tolerating
    /// defensive or partial calls. Blank strings inside a non-empty list, a
    /// blank relation, or a concept whose normalized form appears on both
    /// sides are validation errors. Returns the created edge id.
    pub async fn add_knowledge(
        &mut self,
        concepts: &[String],
        related_concepts: &[String],
        relation: &str,
    ) -> GraphResult<Option<EdgeId>> {
        if concepts.is_empty() || related_concepts.is_empty() {
            debug!("add_knowledge called with an empty side, ignoring");
            return Ok(None);
        }
        validate_concepts("concepts", concepts)?;
        validate_concepts("related_concepts", related_concepts)?;
        if is_blank(relation) {
            return Err(GraphError::validation("relation", "must not be blank"));
        }

        let source_keys: HashSet<String> = concepts.iter().map(|c| clean_text(c)).collect();
        if related_concepts
            .iter()
            .any(|c| source_keys.contains(&clean_text(c)))
        {
            return Err(GraphError::validation(
                "related_concepts",
                "a concept cannot appear as both a source and a target of the same relationship",
            ));
        }

        let sources = self.add_concept_nodes(concepts).await?;
        let targets = self.add_concept_nodes(related_concepts).await?;

        let edge = self.graph.add_edge(&sources, &targets, relation).await?;
        Ok(Some(edge))
    }

    /// Retrieve a knowledge summary for `query`.
    ///
    /// Emits one `* sources - relation - targets` bullet per matched edge,
    /// then one `* concept` bullet per matched node that no emitted edge
    /// already covers. Edges always come before isolated concepts; order
    /// inside each group is not guaranteed.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> GraphResult<String> {
        if is_blank(query) {
            return Err(GraphError::validation("query", "must not be blank"));
        }
        if top_k == 0 {
            return Err(GraphError::validation(
                "top_k",
                "must be a positive integer",
            ));
        }

        let (nodes, edges) = self.graph.query(query, top_k).await?;

        let mut knowledge = String::new();
        for edge in &edges {
            knowledge.push_str("* ");
            knowledge.push_str(&self.joined_display(&edge.sources)?);
            knowledge.push_str(&format!(" - {} - ", edge.relation));
            knowledge.push_str(&self.joined_display(&edge.targets)?);
            knowledge.push('\n');
        }

        // Isolated concepts: only nodes no emitted edge already covers.
        for node in &nodes {
            if edges.iter().any(|edge| edge.contains(&node.id)) {
                continue;
            }
            knowledge.push_str(&format!("* {}\n", node.data));
        }

        Ok(knowledge)
    }

    /// [`retrieve`](Self::retrieve) with the configured default top_k.
    pub async fn retrieve_default(&self, query: &str) -> GraphResult<String> {
        let top_k = self.graph.config().index.default_top_k;
        self.retrieve(query, top_k).await
    }

    async fn add_concept_nodes(&mut self, concepts: &[String]) -> GraphResult<Vec<NodeId>> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for concept in concepts {
            let id = self.graph.add_node(concept).await?;
            if seen.insert(id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn joined_display(&self, ids: &[NodeId]) -> GraphResult<String> {
        let texts: Vec<&str> = ids
            .iter()
            .map(|id| {
                self.graph
                    .node(id)
                    .map(|n| n.data.as_str())
                    .ok_or(GraphError::EntityNotFound { id: *id })
            })
            .collect::<GraphResult<_>>()?;
        Ok(texts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;

    fn test_system() -> RagSystem {
        let mut config = GraphConfig::default_config();
        config.embedding.dimension = 64;
        RagSystem::new(Hypergraph::new(config))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_knowledge_empty_side_is_silent_noop() {
        let mut rag = test_system();
        let result = rag.add_knowledge(&[], &strings(&["OOP"]), "rel").await.unwrap();
        assert!(result.is_none());
        let result = rag.add_knowledge(&strings(&["Python"]), &[], "rel").await.unwrap();
        assert!(result.is_none());
        assert_eq!(rag.graph().node_count(), 0);
        assert_eq!(rag.graph().edge_count(), 0);
    }

    #[tokio::test]
    async fn test_add_knowledge_rejects_blank_entries() {
        let mut rag = test_system();
        let err = rag
            .add_knowledge(&strings(&["Python", " "]), &strings(&["OOP"]), "rel")
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_knowledge_rejects_blank_relation() {
        let mut rag = test_system();
        let err = rag
            .add_knowledge(&strings(&["Python"]), &strings(&["OOP"]), "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_knowledge_rejects_concept_on_both_sides() {
        let mut rag = test_system();
        // "Python" and "python" normalize to the same concept.
        let err = rag
            .add_knowledge(&strings(&["Python"]), &strings(&["python"]), "rel")
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation { .. }));
        // Nothing was created before the rejection.
        assert_eq!(rag.graph().node_count(), 0);
        assert_eq!(rag.graph().edge_count(), 0);
    }

    #[tokio::test]
    async fn test_add_knowledge_creates_nodes_and_edge() {
        let mut rag = test_system();
        let edge = rag
            .add_knowledge(
                &strings(&["Python"]),
                &strings(&["OOP", "Interpreted"]),
                "language_features",
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(rag.graph().node_count(), 3);
        assert_eq!(rag.graph().edge_count(), 1);
        let edge = rag.graph().edge(&edge).unwrap();
        assert_eq!(edge.sources.len(), 1);
        assert_eq!(edge.targets.len(), 2);
    }

    #[tokio::test]
    async fn test_add_knowledge_reuses_existing_concepts() {
        let mut rag = test_system();
        rag.add_knowledge(&strings(&["Python"]), &strings(&["OOP"]), "language_features")
            .await
            .unwrap();
        rag.add_knowledge(
            &strings(&["List Comprehension"]),
            &strings(&["Python"]),
            "programming_technique",
        )
        .await
        .unwrap();

        // "Python" deduplicated across calls: 3 nodes, not 4.
        assert_eq!(rag.graph().node_count(), 3);
        assert_eq!(rag.graph().edge_count(), 2);
    }

    #[tokio::test]
    async fn test_retrieve_validates_inputs() {
        let rag = test_system();
        assert!(matches!(
            rag.retrieve("  ", 4).await,
            Err(GraphError::Validation { .. })
        ));
        assert!(matches!(
            rag.retrieve("Python", 0).await,
            Err(GraphError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_retrieve_completeness() {
        let mut rag = test_system();
        rag.add_knowledge(
            &strings(&["Python"]),
            &strings(&["OOP", "Interpreted"]),
            "language_features",
        )
        .await
        .unwrap();

        // top_k covering the whole index guarantees the edge is returned.
        let knowledge = rag.retrieve("Python", 10).await.unwrap();
        assert!(knowledge.contains("Python"));
        assert!(knowledge.contains("language_features"));
        assert!(knowledge.contains("OOP"));
        assert!(knowledge.contains("Interpreted"));
    }

    #[tokio::test]
    async fn test_retrieve_never_duplicates_seen_nodes() {
        let mut rag = test_system();
        rag.add_knowledge(
            &strings(&["Python"]),
            &strings(&["OOP", "Interpreted"]),
            "language_features",
        )
        .await
        .unwrap();

        // Every node here participates in the edge, so with the whole index
        // returned there must be exactly one bullet: the edge line.
        let knowledge = rag.retrieve("Python", 10).await.unwrap();
        let bullets: Vec<&str> = knowledge.lines().collect();
        assert_eq!(bullets.len(), 1, "got: {knowledge}");
        assert!(bullets[0].starts_with("* "));
        assert!(bullets[0].contains(" - language_features - "));
    }

    #[tokio::test]
    async fn test_retrieve_lists_isolated_concepts_after_edges() {
        let mut rag = test_system();
        rag.add_knowledge(&strings(&["Python"]), &strings(&["OOP"]), "language_features")
            .await
            .unwrap();
        // A concept with no relationships at all.
        rag.graph_mut().add_node("Standalone").await.unwrap();

        let knowledge = rag.retrieve("language features", 10).await.unwrap();
        let lines: Vec<&str> = knowledge.lines().collect();
        assert_eq!(lines.len(), 2, "got: {knowledge}");
        // Edge bullet first, isolated-concept bullet after.
        assert!(lines[0].contains(" - language_features - "));
        assert_eq!(lines[1], "* Standalone");
    }

    #[tokio::test]
    async fn test_retrieve_oversized_top_k_returns_available_items() {
        let mut rag = test_system();
        rag.add_knowledge(&strings(&["Python"]), &strings(&["OOP"]), "language_features")
            .await
            .unwrap();

        // 2 nodes + 1 edge = 3 indexed items; top_k=1000 must not fail.
        let knowledge = rag.retrieve("Python", 1000).await.unwrap();
        assert!(!knowledge.is_empty());
        assert!(knowledge.lines().count() <= 3);
    }

    #[tokio::test]
    async fn test_retrieve_default_uses_configured_top_k() {
        let mut rag = test_system();
        rag.add_knowledge(&strings(&["Python"]), &strings(&["OOP"]), "language_features")
            .await
            .unwrap();
        let knowledge = rag.retrieve_default("Python").await.unwrap();
        assert!(!knowledge.is_empty());
    }
}
