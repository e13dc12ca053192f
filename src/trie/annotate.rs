//! Level, height and content hash annotation
//!
//! All three passes run over the fully populated trie, with explicit work
//! stacks so that long words or long sibling chains cannot exhaust the call
//! stack.

use super::WordGraph;
use crate::model::{ContentHash, NodeId};

enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

impl WordGraph {
    /// Run the level, height and hash passes in that order
    pub(crate) fn annotate(&mut self) {
        self.compute_levels();
        self.compute_heights();
        self.compute_hashes();
    }

    /// Depth from the root: root = 0, child = parent + 1
    fn compute_levels(&mut self) {
        let mut stack = vec![(NodeId::ROOT, 0u32)];
        while let Some((id, level)) = stack.pop() {
            self.node_mut(id).level = level;
            let children: Vec<_> = self.children(id).collect();
            stack.extend(children.into_iter().map(|child| (child, level + 1)));
        }
    }

    /// Leaf = 0, otherwise 1 + max height over the children chain
    fn compute_heights(&mut self) {
        let mut stack = vec![Visit::Enter(NodeId::ROOT)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    stack.push(Visit::Exit(id));
                    stack.extend(self.children(id).map(Visit::Enter));
                }
                Visit::Exit(id) => {
                    let height = self
                        .children(id)
                        .map(|child| self.node(child).height + 1)
                        .max()
                        .unwrap_or(0);
                    self.node_mut(id).height = height;
                }
            }
        }
    }

    /// Post-order digest over `next` and `children` links.
    ///
    /// A node's hash commits to its remaining sibling chain, its children
    /// chain, its own value and its end-of-word flag, so two nodes hash equal
    /// exactly when everything reachable from them is identical.
    fn compute_hashes(&mut self) {
        let mut stack = vec![Visit::Enter(NodeId::ROOT)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    stack.push(Visit::Exit(id));
                    let node = self.node(id);
                    stack.extend(node.next.map(Visit::Enter));
                    stack.extend(node.children.map(Visit::Enter));
                }
                Visit::Exit(id) => {
                    let hash = self.node_digest(id);
                    self.node_mut(id).content_hash = hash;
                }
            }
        }
    }

    fn node_digest(&self, id: NodeId) -> ContentHash {
        let node = self.node(id);
        let next = node.next.map(|n| self.node(n).content_hash);
        let children = node.children.map(|c| self.node(c).content_hash);

        let value = u32::from(node.value).to_le_bytes();
        let flags = [
            u8::from(next.is_some()),
            u8::from(children.is_some()),
            u8::from(node.end_of_word),
        ];
        ContentHash::digest_many(&[
            next.as_ref().map_or(&[][..], |h| &h.as_bytes()[..]),
            children.as_ref().map_or(&[][..], |h| &h.as_bytes()[..]),
            &value,
            &flags,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated(words: &[&str]) -> WordGraph {
        let mut graph = WordGraph::new();
        for word in words {
            graph.insert(word).unwrap();
        }
        graph.annotate();
        graph
    }

    fn path(graph: &WordGraph, word: &str) -> NodeId {
        let mut current = NodeId::ROOT;
        for ch in word.chars() {
            current = graph
                .children(current)
                .find(|&id| graph.node(id).value() == ch)
                .unwrap();
        }
        current
    }

    #[test]
    fn test_levels() {
        let graph = annotated(&["cat", "dog"]);
        assert_eq!(graph.root().level(), 0);
        assert_eq!(graph.node(path(&graph, "c")).level(), 1);
        assert_eq!(graph.node(path(&graph, "do")).level(), 2);
        assert_eq!(graph.node(path(&graph, "cat")).level(), 3);
    }

    #[test]
    fn test_heights_ignore_siblings() {
        let graph = annotated(&["a", "bcd"]);
        assert_eq!(graph.node(path(&graph, "a")).height(), 0);
        assert_eq!(graph.node(path(&graph, "b")).height(), 2);
        assert_eq!(graph.root().height(), 3);
        assert_eq!(graph.max_height(), 3);
    }

    #[test]
    fn test_heights_decrease_downward() {
        let graph = annotated(&["cat", "car", "cart", "dog"]);
        for id in graph.reachable() {
            for child in graph.children(id) {
                assert!(graph.node(child).height() < graph.node(id).height());
            }
        }
    }

    #[test]
    fn test_identical_subtrees_hash_equal() {
        let graph = annotated(&["xab", "yab"]);
        let left = graph.node(path(&graph, "xa"));
        let right = graph.node(path(&graph, "ya"));
        assert_eq!(left.content_hash(), right.content_hash());
        assert!(!left.content_hash().is_zero());
    }

    #[test]
    fn test_hash_distinguishes_child_from_sibling() {
        // "a" with child "b" versus "a" followed by sibling "b".
        let graph = annotated(&["xa", "xab", "ya", "yb"]);
        let nested = graph.node(path(&graph, "xa"));
        let flat = graph.node(path(&graph, "ya"));
        assert_ne!(nested.content_hash(), flat.content_hash());
    }

    #[test]
    fn test_hash_covers_end_of_word() {
        let graph = annotated(&["xab", "ya", "yab"]);
        let plain = graph.node(path(&graph, "xa"));
        let terminal = graph.node(path(&graph, "ya"));
        assert_ne!(plain.content_hash(), terminal.content_hash());
    }

    #[test]
    fn test_hash_covers_remaining_siblings() {
        let graph = annotated(&["xa", "xb", "ya"]);
        let with_sibling = graph.node(path(&graph, "xa"));
        let alone = graph.node(path(&graph, "ya"));
        assert_ne!(with_sibling.content_hash(), alone.content_hash());
    }
}
