//! Trait definitions for the concept graph's external collaborators.

mod embedder;
mod vector_index;

pub use embedder::TextEmbedder;
pub use vector_index::VectorIndex;
