//! Graph node types
//!
//! Nodes live in an arena owned by [`WordGraph`](crate::WordGraph) and refer
//! to each other through [`NodeId`] handles. A node owns the head of its
//! children chain (`children`) and the link to its next sibling (`next`);
//! `parents` holds non-owning back-references to every node whose children
//! head currently points here.

use super::ContentHash;
use std::collections::BTreeSet;
use std::fmt;

/// Handle of a node inside a [`WordGraph`](crate::WordGraph) arena.
///
/// Ids are handed out in creation order, so they double as the node's
/// diagnostic identity. The root is always `NodeId::ROOT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The sentinel root
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of this node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single trie/DAWG node
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) value: char,
    pub(crate) children: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) parents: BTreeSet<NodeId>,
    pub(crate) is_first_child: bool,
    pub(crate) end_of_word: bool,
    pub(crate) level: u32,
    pub(crate) height: u32,
    pub(crate) content_hash: ContentHash,
}

impl Node {
    /// Value held by the sentinel root. Never a real character of a word.
    pub const SENTINEL: char = '\0';

    pub(crate) fn root() -> Self {
        Node::new(NodeId::ROOT, Node::SENTINEL, false)
    }

    pub(crate) fn new(id: NodeId, value: char, is_first_child: bool) -> Self {
        Node {
            id,
            value,
            children: None,
            next: None,
            parents: BTreeSet::new(),
            is_first_child,
            end_of_word: false,
            level: 0,
            height: 0,
            content_hash: ContentHash::ZERO,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The code point on the edge leading into this node
    pub fn value(&self) -> char {
        self.value
    }

    /// Head of the children chain, if any
    pub fn children(&self) -> Option<NodeId> {
        self.children
    }

    /// Next sibling in the chain this node belongs to
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Every node whose children head currently points at this node
    pub fn parents(&self) -> &BTreeSet<NodeId> {
        &self.parents
    }

    pub fn is_first_child(&self) -> bool {
        self.is_first_child
    }

    /// Whether the path from the root to this node spells an inserted word
    pub fn is_end_of_word(&self) -> bool {
        self.end_of_word
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Depth from the root (root = 0). Valid after annotation.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Longest downward path to a leaf. Valid after annotation.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Structural digest of this node, its children and its remaining siblings
    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    /// Nodes merge only when value, level and digest all agree
    pub(crate) fn is_equivalent(&self, other: &Node) -> bool {
        self.value == other.value
            && self.level == other.level
            && self.content_hash == other.content_hash
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == NodeId::ROOT {
            write!(f, "∅ {}", self.level)
        } else {
            write!(f, "{} {}", self.value, self.level)
        }
    }
}
