//! Height-ordered merging of equivalent subtrees

use super::{push_chain_reversed, GraphState, WordGraph};
use crate::model::NodeId;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Summary of a minimization run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MinimizeStats {
    /// Distinct nodes reachable before merging
    pub nodes_before: usize,
    /// Distinct nodes reachable after merging
    pub nodes_after: usize,
    /// Number of candidates redirected onto an equivalent node
    pub merges: usize,
}

impl WordGraph {
    /// Annotate the trie and merge equivalent subtrees in place.
    ///
    /// After this call the graph is a DAG and no longer accepts insertions.
    /// Calling it again is a no-op.
    pub fn optimize(&mut self) -> Result<MinimizeStats> {
        self.ensure_usable()?;
        if self.is_optimized() {
            debug!("graph already optimized");
            return Ok(MinimizeStats::default());
        }

        info!(nodes = self.len(), "computing levels, heights and hashes");
        self.annotate();

        match self.minimize() {
            Ok(stats) => {
                self.set_state(GraphState::Optimized);
                info!(
                    before = stats.nodes_before,
                    after = stats.nodes_after,
                    merges = stats.merges,
                    "graph minimized"
                );
                Ok(stats)
            }
            Err(e) => {
                self.set_state(GraphState::Poisoned);
                Err(e)
            }
        }
    }

    fn minimize(&mut self) -> Result<MinimizeStats> {
        let mut stats = MinimizeStats {
            nodes_before: self.reachable().len(),
            ..Default::default()
        };

        // The root has the maximum height and is never merged.
        for height in (0..self.max_height()).rev() {
            let nodes = self.collect_nodes_of_height(height);
            debug!(height, nodes = nodes.len(), "processing height");
            stats.merges += self.merge_level(nodes)?;
        }

        stats.nodes_after = self.reachable().len();
        Ok(stats)
    }

    /// Distinct reachable nodes of exactly `height`, in depth-first order.
    ///
    /// Taller nodes contribute their children chain; shorter ones are not
    /// descended into.
    fn collect_nodes_of_height(&self, height: u32) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = self.node(id);
            if node.height == height {
                found.push(id);
            } else if node.height > height {
                push_chain_reversed(&mut stack, self.children(id));
            }
        }

        found
    }

    /// Merge first-child candidates onto the first equivalent kept node.
    ///
    /// Returns the number of merges performed.
    fn merge_level(&mut self, nodes: Vec<NodeId>) -> Result<usize> {
        let (candidates, mut kept): (Vec<_>, Vec<_>) = nodes
            .into_iter()
            .partition(|&id| self.node(id).is_first_child);

        let mut merges = 0;
        for candidate in candidates {
            let target = kept
                .iter()
                .copied()
                .find(|&k| self.node(candidate).is_equivalent(self.node(k)));
            match target {
                Some(target) => {
                    self.redirect(candidate, target)?;
                    merges += 1;
                }
                None => kept.push(candidate),
            }
        }

        Ok(merges)
    }

    /// Point every parent of `from` at `to`.
    ///
    /// `from` loses all of its back-references and becomes unreachable.
    fn redirect(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let parents = std::mem::take(&mut self.node_mut(from).parents);
        if parents.is_empty() {
            return Err(Error::Invariant(format!(
                "node {} ({:?}) has no parents to redirect",
                from,
                self.node(from).value
            )));
        }

        for parent in parents {
            debug_assert_eq!(self.node(parent).children, Some(from));
            self.node_mut(parent).children = Some(to);
            self.node_mut(to).parents.insert(parent);
        }
        Ok(())
    }
}
