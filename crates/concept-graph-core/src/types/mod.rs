//! Core domain types for the concept graph.

mod hyperedge;
mod node;
mod slot;

pub use hyperedge::*;
pub use node::*;
pub use slot::*;
