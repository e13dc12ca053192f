//! # wordgraph
//!
//! Builds a minimal acyclic word graph (DAWG) from a vocabulary and encodes
//! it as a flat, randomly-traversable binary array.
//!
//! ## Pipeline
//!
//! - **Trie**: words are inserted one code point per level under a sentinel
//!   root
//! - **Optimize**: every node is annotated with level, height and a BLAKE3
//!   content hash, then equivalent subtrees are merged bottom-up by height
//! - **Flatten**: the DAG is laid out level by level into fixed records, each
//!   pointing at the first slot of its children's sibling run
//! - **Encode**: records are written as 9-byte little-endian entries
//!
//! ## Example
//!
//! ```no_run
//! use wordgraph::WordGraph;
//!
//! let mut graph = WordGraph::new();
//! for word in ["cat", "car", "cart", "dog"] {
//!     graph.insert(word)?;
//! }
//! graph.optimize()?;
//! let array = graph.flatten_and_encode("dawg.wg")?;
//! assert_eq!(array.records()[0].value, 0);
//! # Ok::<(), wordgraph::Error>(())
//! ```

pub mod config;
pub mod flat;
pub mod model;
pub mod store;
pub mod trie;
pub mod viz;

mod error;

pub use config::BuildConfig;
pub use error::{Error, Result};
pub use flat::{flatten, ChildRun, FlatArray, FlatRecord};
pub use model::{ContentHash, Node, NodeId};
pub use store::{decode, encode, read_artifact, write_artifact, RECORD_SIZE};
pub use trie::{create_root, Chain, GraphState, MinimizeStats, VocabularyReport, WordGraph};
pub use viz::{export_graph, DotExport, GraphStats};
