//! Error types for wordgraph

use thiserror::Error;

/// Result type alias for wordgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or encoding a word graph
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed word: {0}")]
    MalformedWord(String),

    #[error("Graph is already optimized and no longer accepts insertions")]
    AlreadyOptimized,

    #[error("Graph must be optimized before it can be flattened")]
    NotOptimized,

    #[error("Graph was left inconsistent by a failed pass")]
    Poisoned,

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("Array of {0} slots exceeds the 32-bit index range")]
    Capacity(usize),

    #[error("Config error: {0}")]
    Config(String),
}
