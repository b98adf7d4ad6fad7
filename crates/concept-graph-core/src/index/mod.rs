//! Vector index implementations.

mod flat;

pub use flat::FlatIndex;
