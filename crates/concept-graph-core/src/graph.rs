//! The hypergraph: fuzzy-deduplicated nodes, always-create edges, and
//! mixed-type similarity queries over one shared index.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::GraphConfig;
use crate::embedding::HashEmbedder;
use crate::error::{GraphError, GraphResult};
use crate::index::FlatIndex;
use crate::normalize::{clean_text, is_blank};
use crate::store::EntityStore;
use crate::traits::{TextEmbedder, VectorIndex};
use crate::types::{EdgeId, Hyperedge, IndexSlot, Node, NodeId};

/// Hypergraph over an entity store, an embedder, and a shared similarity
/// index.
///
/// The index is shared between nodes and edges so that a single query can
/// surface both concepts and relationships ranked by the same distance
/// metric; a parallel slot list tags what each index position resolves to.
///
/// Mutations take `&mut self`: one logical writer, each call atomic from the
/// caller's perspective. The index is append-only, so slot ids issued during
/// this instance's lifetime never move.
pub struct Hypergraph {
    store: EntityStore,
    embedder: Box<dyn TextEmbedder>,
    index: Box<dyn VectorIndex>,
    slots: Vec<IndexSlot>,
    config: GraphConfig,
}

impl Hypergraph {
    /// Create a graph with the default embedder and flat index.
    pub fn new(config: GraphConfig) -> Self {
        let dimension = config.embedding.dimension;
        Self {
            store: EntityStore::new(),
            embedder: Box::new(HashEmbedder::new(dimension)),
            index: Box::new(FlatIndex::new(dimension)),
            slots: Vec::new(),
            config,
        }
    }

    /// Create a graph from caller-provided components.
    ///
    /// The embedder and index dimensions must agree with each other and with
    /// the configuration.
    pub fn with_components(
        config: GraphConfig,
        embedder: Box<dyn TextEmbedder>,
        index: Box<dyn VectorIndex>,
    ) -> GraphResult<Self> {
        if embedder.dimension() != config.embedding.dimension {
            return Err(GraphError::DimensionMismatch {
                expected: config.embedding.dimension,
                actual: embedder.dimension(),
            });
        }
        if index.dimension() != config.embedding.dimension {
            return Err(GraphError::DimensionMismatch {
                expected: config.embedding.dimension,
                actual: index.dimension(),
            });
        }
        Ok(Self {
            store: EntityStore::new(),
            embedder,
            index,
            slots: Vec::new(),
            config,
        })
    }

    /// Add a concept node, or return the existing one if a near-duplicate is
    /// already indexed.
    ///
    /// The text is normalized for indexing; the stored node keeps the
    /// original for display. If the nearest node-typed slot lies within
    /// `dedup_epsilon`, that node is returned and nothing is created, so
    /// near-duplicate phrasing is idempotent. Edge-typed slots are skipped
    /// during the dedup lookup: an edge phrase can never satisfy a node
    /// lookup.
    pub async fn add_node(&mut self, text: &str) -> GraphResult<NodeId> {
        if is_blank(text) {
            return Err(GraphError::validation("text", "node text must not be blank"));
        }
        let normalized = clean_text(text);
        if normalized.is_empty() {
            return Err(GraphError::validation(
                "text",
                "node text must contain at least one word character",
            ));
        }

        let vector = self.embedder.embed(&normalized).await?;

        if !self.slots.is_empty() {
            let scan = self.config.index.dedup_scan_k.min(self.slots.len());
            let hits = self.index.search(&vector, scan).await?;
            for (slot, distance) in hits {
                if distance > self.config.index.dedup_epsilon {
                    break;
                }
                if let Some(existing) = self.slot(slot)?.as_node() {
                    debug!(%existing, distance, "node dedup hit, returning existing concept");
                    return Ok(existing);
                }
                // Edge-typed slot within epsilon: not a node duplicate.
            }
        }

        // Index first, create second: a failed append must not strand a
        // stored node without an index slot.
        let slot = self.index.add(&vector).await?;
        self.check_next_slot(slot)?;
        let id = self.store.create_node(text, &normalized);
        self.slots.push(IndexSlot::Node(id));
        debug!(%id, slot, "created node");
        Ok(id)
    }

    /// Add a directed hyperedge. Edges are never deduplicated: calling this
    /// twice with identical arguments yields two distinct edges.
    ///
    /// The edge is indexed under a composite phrase,
    /// `"<sources> - <relation> - <targets>"`, built from the normalized
    /// member texts.
    pub async fn add_edge(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
        relation: &str,
    ) -> GraphResult<EdgeId> {
        if sources.is_empty() {
            return Err(GraphError::validation("sources", "must not be empty"));
        }
        if targets.is_empty() {
            return Err(GraphError::validation("targets", "must not be empty"));
        }
        if is_blank(relation) {
            return Err(GraphError::validation("relation", "must not be blank"));
        }

        let sources = dedup_ids(sources);
        let targets = dedup_ids(targets);

        let source_set: HashSet<NodeId> = sources.iter().copied().collect();
        if targets.iter().any(|id| source_set.contains(id)) {
            return Err(GraphError::validation(
                "targets",
                "a concept cannot appear as both a source and a target of the same relationship",
            ));
        }

        let phrase = format!(
            "{} - {} - {}",
            self.joined_normalized(&sources)?,
            relation,
            self.joined_normalized(&targets)?,
        );

        // The phrase only needs pre-existing nodes, so embedding and the
        // index append both happen before the edge record exists; a failure
        // in either leaves the store untouched.
        let vector = self.embedder.embed(&phrase).await?;
        let slot = self.index.add(&vector).await?;
        self.check_next_slot(slot)?;
        let id = self.store.create_edge(sources, targets, relation);
        self.slots.push(IndexSlot::Edge(id));
        debug!(%id, slot, %phrase, "created hyperedge");
        Ok(id)
    }

    /// Retrieve the nodes and edges nearest to `criteria`.
    ///
    /// Returns up to `top_k` entities total, partitioned by kind and
    /// deduplicated by id. A `top_k` exceeding the index size returns
    /// everything available rather than failing. Order within each side
    /// follows ascending distance but is not otherwise guaranteed.
    pub async fn query(
        &self,
        criteria: &str,
        top_k: usize,
    ) -> GraphResult<(Vec<Node>, Vec<Hyperedge>)> {
        if self.slots.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let vector = self.embedder.embed(criteria).await?;
        let k = top_k.min(self.slots.len());
        let hits = self.index.search(&vector, k).await?;

        let mut seen_nodes: HashSet<NodeId> = HashSet::new();
        let mut seen_edges: HashSet<EdgeId> = HashSet::new();
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (slot, _distance) in hits {
            match *self.slot(slot)? {
                IndexSlot::Node(id) => {
                    if seen_nodes.insert(id) {
                        nodes.push(self.resolve_node(&id)?.clone());
                    }
                }
                IndexSlot::Edge(id) => {
                    if seen_edges.insert(id) {
                        let edge = self.store.edge(&id).ok_or_else(|| {
                            GraphError::Index(format!("slot {slot} refers to unknown edge {id}"))
                        })?;
                        edges.push(edge.clone());
                    }
                }
            }
        }
        debug!(
            criteria,
            top_k,
            nodes = nodes.len(),
            edges = edges.len(),
            "query resolved"
        );
        Ok((nodes, edges))
    }

    /// Persist a snapshot: the signed incidence matrix, node display texts,
    /// and edge relation labels.
    ///
    /// The matrix is rebuilt from scratch on every call: one row per node
    /// (row = sequence number), one column per edge (column = insertion
    /// order), +1 for a source, -1 for a target, 0 otherwise. All three
    /// artifacts are JSON. Write-only: no loader reconstructs a graph from
    /// them, and a failure partway leaves the outputs inconsistent.
    pub async fn save(
        &self,
        matrix_path: impl AsRef<Path>,
        nodes_path: impl AsRef<Path>,
        edges_path: impl AsRef<Path>,
    ) -> GraphResult<()> {
        let n_nodes = self.store.node_count();
        let n_edges = self.store.edge_count();

        let mut matrix = vec![vec![0i8; n_edges]; n_nodes];
        for (col, edge) in self.store.edges_in_order().enumerate() {
            for id in &edge.sources {
                matrix[self.resolve_node(id)?.seq][col] = 1;
            }
            for id in &edge.targets {
                matrix[self.resolve_node(id)?.seq][col] = -1;
            }
        }

        write_json(matrix_path.as_ref(), &matrix)?;

        let node_texts: Vec<&str> = self.store.nodes_in_order().map(|n| n.data.as_str()).collect();
        write_json(nodes_path.as_ref(), &node_texts)?;

        let relations: Vec<&str> = self
            .store
            .edges_in_order()
            .map(|e| e.relation.as_str())
            .collect();
        write_json(edges_path.as_ref(), &relations)?;

        info!(
            n_nodes,
            n_edges,
            matrix = %matrix_path.as_ref().display(),
            "saved hypergraph snapshot"
        );
        Ok(())
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.store.node(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Hyperedge> {
        self.store.edge(id)
    }

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn slot(&self, slot: usize) -> GraphResult<&IndexSlot> {
        self.slots
            .get(slot)
            .ok_or_else(|| GraphError::Index(format!("index returned unknown slot {slot}")))
    }

    fn check_next_slot(&self, slot: usize) -> GraphResult<()> {
        if slot != self.slots.len() {
            return Err(GraphError::Index(format!(
                "index assigned slot {} but {} entities are tracked",
                slot,
                self.slots.len()
            )));
        }
        Ok(())
    }

    fn resolve_node(&self, id: &NodeId) -> GraphResult<&Node> {
        self.store
            .node(id)
            .ok_or(GraphError::EntityNotFound { id: *id })
    }

    fn joined_normalized(&self, ids: &[NodeId]) -> GraphResult<String> {
        let texts: Vec<&str> = ids
            .iter()
            .map(|id| self.resolve_node(id).map(|n| n.normalized.as_str()))
            .collect::<GraphResult<_>>()?;
        Ok(texts.join(", "))
    }
}

fn dedup_ids(ids: &[NodeId]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> GraphResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
