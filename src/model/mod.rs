//! Core data model types for wordgraph

mod hash;
mod node;

pub use hash::ContentHash;
pub use node::{Node, NodeId};
