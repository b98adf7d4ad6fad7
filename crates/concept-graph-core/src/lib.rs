//! Concept Graph Core Library
//!
//! A minimal knowledge-representation engine: atomic concepts as nodes,
//! N-to-M relationships between concept groups as directed hyperedges,
//! fuzzy deduplication of near-identical concepts via semantic similarity,
//! and free-text retrieval formatted as a flat knowledge listing.
//!
//! # Architecture
//!
//! - Domain types ([`Node`], [`Hyperedge`], [`IndexSlot`])
//! - Collaborator traits ([`TextEmbedder`], [`VectorIndex`]) with default
//!   implementations ([`HashEmbedder`], [`FlatIndex`])
//! - [`EntityStore`]: authoritative ownership of all records
//! - [`Hypergraph`]: deduplicated node creation, always-create edges,
//!   mixed-type similarity queries, snapshot persistence
//! - [`RagSystem`]: knowledge ingestion and formatted retrieval
//!
//! # Example
//!
//! ```
//! use concept_graph_core::{GraphConfig, Hypergraph, RagSystem};
//!
//! # async fn example() -> concept_graph_core::GraphResult<()> {
//! let mut rag = RagSystem::new(Hypergraph::new(GraphConfig::default_config()));
//! rag.add_knowledge(
//!     &["Python".to_string()],
//!     &["OOP".to_string(), "Interpreted".to_string()],
//!     "language_features",
//! )
//! .await?;
//! let knowledge = rag.retrieve("Python", 4).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod index;
pub mod normalize;
pub mod retrieval;
pub mod store;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::GraphConfig;
pub use embedding::HashEmbedder;
pub use error::{GraphError, GraphResult};
pub use graph::Hypergraph;
pub use index::FlatIndex;
pub use retrieval::RagSystem;
pub use store::EntityStore;
pub use traits::{TextEmbedder, VectorIndex};
pub use types::{EdgeId, EmbeddingVector, Hyperedge, IndexSlot, Node, NodeId};
