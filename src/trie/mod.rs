//! Word trie that is minimized in place into a DAWG
//!
//! The graph is built in three stages:
//! - words are inserted into a plain trie rooted at a sentinel node
//! - [`WordGraph::optimize`] annotates every node with its level, height and
//!   content hash, then merges equivalent subtrees bottom-up
//! - the minimized graph is flattened into a [`FlatArray`](crate::FlatArray)
//!
//! Nodes are never freed: a node merged away simply stops being reachable
//! from the root.

mod annotate;
mod builder;
mod minimize;

pub use builder::VocabularyReport;
pub use minimize::MinimizeStats;

use crate::model::{Node, NodeId};
use crate::{Error, Result};
use std::collections::HashSet;

/// Lifecycle of a [`WordGraph`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphState {
    /// Accepting insertions
    Building,
    /// Annotated and minimized; read-only from here on
    Optimized,
    /// A pass failed halfway through; the graph must not be reused
    Poisoned,
}

/// An arena of nodes forming a trie, and after optimization a DAWG
#[derive(Clone, Debug)]
pub struct WordGraph {
    nodes: Vec<Node>,
    state: GraphState,
}

/// Create a graph holding only the sentinel root
pub fn create_root() -> WordGraph {
    WordGraph::new()
}

impl WordGraph {
    /// Create a graph holding only the sentinel root
    pub fn new() -> Self {
        WordGraph {
            nodes: vec![Node::root()],
            state: GraphState::Building,
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Look up a node by handle.
    ///
    /// Handles are only minted by this graph, so an out-of-range id is a
    /// caller bug and panics like slice indexing does.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes ever created, including ones merged away
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn is_optimized(&self) -> bool {
        self.state == GraphState::Optimized
    }

    /// Iterate a sibling chain starting at `head`
    pub fn chain(&self, head: Option<NodeId>) -> Chain<'_> {
        Chain {
            graph: self,
            cursor: head,
        }
    }

    /// Iterate the children of `id` in sibling order
    pub fn children(&self, id: NodeId) -> Chain<'_> {
        self.chain(self.node(id).children)
    }

    /// Every distinct node reachable from the root, in depth-first preorder
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            push_chain_reversed(&mut stack, self.children(id));
        }

        order
    }

    /// Height of the root, which is the maximum height in the graph
    pub fn max_height(&self) -> u32 {
        self.root().height
    }

    pub(crate) fn alloc(&mut self, value: char, is_first_child: bool) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(id, value, is_first_child));
        id
    }

    pub(crate) fn ensure_usable(&self) -> Result<()> {
        match self.state {
            GraphState::Poisoned => Err(Error::Poisoned),
            _ => Ok(()),
        }
    }

    pub(crate) fn set_state(&mut self, state: GraphState) {
        self.state = state;
    }
}

impl Default for WordGraph {
    fn default() -> Self {
        WordGraph::new()
    }
}

/// Iterator over a sibling chain
pub struct Chain<'g> {
    graph: &'g WordGraph,
    cursor: Option<NodeId>,
}

impl Iterator for Chain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cursor?;
        self.cursor = self.graph.node(id).next;
        Some(id)
    }
}

/// Push a chain so that popping the stack yields it in sibling order
pub(crate) fn push_chain_reversed(stack: &mut Vec<NodeId>, chain: Chain<'_>) {
    let start = stack.len();
    stack.extend(chain);
    stack[start..].reverse();
}
