//! Diagnostic exports for word graphs
//!
//! Graphviz DOT renderings of the DAG and of the flat array, plus a
//! serializable summary of a build. Nothing here mutates what it reads.

mod dot;

pub use dot::{export_graph, DotExport};

use crate::flat::FlatArray;
use crate::store::RECORD_SIZE;
use crate::trie::{MinimizeStats, VocabularyReport, WordGraph};
use serde::{Deserialize, Serialize};

/// Summary of a build, as reported by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Words accepted from the vocabulary
    pub words: usize,
    /// Words skipped as malformed
    pub skipped: usize,
    /// Nodes in the trie before minimization
    pub trie_nodes: usize,
    /// Distinct nodes left after minimization
    pub dawg_nodes: usize,
    /// Height of the root
    pub max_height: u32,
    /// Records in the flat array
    pub records: usize,
    /// Size of the encoded artifact in bytes
    pub artifact_bytes: u64,
}

impl GraphStats {
    pub fn collect(
        graph: &WordGraph,
        vocabulary: &VocabularyReport,
        minimize: &MinimizeStats,
        array: &FlatArray,
    ) -> Self {
        GraphStats {
            words: vocabulary.inserted,
            skipped: vocabulary.skipped,
            trie_nodes: minimize.nodes_before,
            dawg_nodes: minimize.nodes_after,
            max_height: graph.max_height(),
            records: array.len(),
            artifact_bytes: (array.len() * RECORD_SIZE) as u64,
        }
    }
}
