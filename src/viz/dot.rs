//! Graphviz DOT export

use crate::flat::FlatArray;
use crate::model::Node;
use crate::trie::WordGraph;
use crate::Result;
use std::path::Path;

/// Types that can render themselves as a DOT digraph
pub trait DotExport {
    fn to_dot(&self) -> String;
}

/// Write the DOT rendering of `source` to `path`
pub fn export_graph(source: &impl DotExport, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, source.to_dot())?;
    Ok(())
}

fn label(value: char) -> String {
    match value {
        Node::SENTINEL => "∅".to_string(),
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        c => c.to_string(),
    }
}

/// The DAG reachable from the root.
///
/// Each node is drawn once. The edge to the head of a children chain is
/// solid; edges to the rest of the chain are dotted. End-of-word nodes are
/// drawn with a double circle.
impl DotExport for WordGraph {
    fn to_dot(&self) -> String {
        let reachable = self.reachable();
        let mut out = String::from("digraph Tree {\n\trankdir=LR\n");

        for &id in &reachable {
            let node = self.node(id);
            let shape = if node.is_end_of_word() {
                ", shape=doublecircle"
            } else {
                ""
            };
            out.push_str(&format!("\t{} [label=\"{}\"{}];\n", id, label(node.value()), shape));
        }
        for &id in &reachable {
            for (i, child) in self.children(id).enumerate() {
                let style = if i == 0 { "" } else { " [style=\"dotted\"]" };
                out.push_str(&format!("\t{} -> {}{};\n", id, child, style));
            }
        }

        out.push_str("}\n");
        out
    }
}

/// The flat array, following each record's sibling run
impl DotExport for FlatArray {
    fn to_dot(&self) -> String {
        let mut out = String::from("digraph Array {\n\trankdir=LR\n");

        for (slot, record) in self.iter().enumerate() {
            let value = record.as_char().map(label).unwrap_or_else(|| "?".into());
            out.push_str(&format!("\t{} [label=\"{}\"];\n", slot, value));
        }
        for slot in 0..self.len() {
            for (child, _) in self.children(slot) {
                out.push_str(&format!("\t{} -> {};\n", slot, child));
            }
        }

        out.push_str("}\n");
        out
    }
}
