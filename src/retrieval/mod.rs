//! Vector indexing, similarity search, and the session/index registry

mod index;
mod registry;

pub use index::{ScoredChunk, VectorIndex};
pub use registry::IndexRegistry;
