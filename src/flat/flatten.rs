//! Level-order flattening of a minimized graph

use super::{FlatArray, FlatRecord};
use crate::model::NodeId;
use crate::trie::WordGraph;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Flatten an optimized graph into a [`FlatArray`].
///
/// Slots are assigned level by level (root first). A level is made of the
/// children runs of the previous level, taken in slot order. Minimization can
/// point a parent into the middle of a sibling chain, so a run is always laid
/// out from the earliest entry into its chain: every sibling run lands in
/// consecutive slots and a shared node is allocated only once.
pub fn flatten(graph: &WordGraph) -> Result<FlatArray> {
    graph.ensure_usable()?;
    if !graph.is_optimized() {
        return Err(Error::NotOptimized);
    }

    let mut records = Vec::new();
    let mut order = Vec::new();
    let mut slots = HashMap::new();

    allocate(graph, NodeId::ROOT, &mut records, &mut order, &mut slots)?;

    let mut level_start = 0;
    let mut level = 0u32;
    while level_start < records.len() {
        let level_end = records.len();
        let heads: Vec<NodeId> = order[level_start..level_end]
            .iter()
            .filter_map(|&id| graph.node(id).children())
            .collect();

        for head in run_entries(graph, &heads) {
            let mut cursor = Some(head);
            while let Some(id) = cursor {
                allocate(graph, id, &mut records, &mut order, &mut slots)?;
                cursor = graph.node(id).next();
            }
        }

        level += 1;
        if records.len() > level_end {
            debug!(level, added = records.len() - level_end, "flattened level");
        }
        level_start = level_end;
    }

    debug_assert!(slots.iter().all(|(&id, &slot)| {
        graph.node(id).children().is_none() || records[slot].has_children()
    }));

    info!(records = records.len(), "graph flattened");
    Ok(FlatArray::from_records(records))
}

/// Reduce the children heads of one level to the entries each run is laid out
/// from. A head sitting further down the chain of another head is covered by
/// that run and dropped; the rest keep their first-seen order.
fn run_entries(graph: &WordGraph, heads: &[NodeId]) -> Vec<NodeId> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for &head in heads {
        if seen.insert(head) {
            entries.push(head);
        }
    }

    let mut walked = HashSet::new();
    let mut covered = HashSet::new();
    for &entry in &entries {
        if !walked.insert(entry) {
            continue;
        }
        let mut cursor = graph.node(entry).next();
        while let Some(id) = cursor {
            if seen.contains(&id) {
                covered.insert(id);
            }
            if !walked.insert(id) {
                break;
            }
            cursor = graph.node(id).next();
        }
    }

    entries.retain(|id| !covered.contains(id));
    entries
}

fn allocate(
    graph: &WordGraph,
    id: NodeId,
    records: &mut Vec<FlatRecord>,
    order: &mut Vec<NodeId>,
    slots: &mut HashMap<NodeId, usize>,
) -> Result<()> {
    if slots.contains_key(&id) {
        return Err(Error::Invariant(format!(
            "node {} reached by two sibling runs",
            id
        )));
    }

    let node = graph.node(id);
    let slot = records.len();
    let index = u32::try_from(slot).map_err(|_| Error::Capacity(slot))?;
    records.push(FlatRecord::new(node.value(), node.next().is_none()));
    order.push(id);
    slots.insert(id, slot);

    // Parents all live on the previous level, so they already have slots.
    for parent in node.parents() {
        if let Some(&parent_slot) = slots.get(parent) {
            let parent_record = &mut records[parent_slot];
            if !parent_record.has_children() {
                parent_record.children_index = index;
            }
        }
    }
    Ok(())
}

impl WordGraph {
    /// Flatten this graph; see [`flatten`]
    pub fn flatten(&self) -> Result<FlatArray> {
        flatten(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimized(words: &[&str]) -> WordGraph {
        let mut graph = WordGraph::new();
        for word in words {
            graph.insert(word).unwrap();
        }
        graph.optimize().unwrap();
        graph
    }

    fn chars(array: &FlatArray) -> String {
        array
            .iter()
            .map(|r| match r.as_char() {
                Some('\0') => '∅',
                Some(c) => c,
                None => '?',
            })
            .collect()
    }

    #[test]
    fn test_root_only() {
        let array = optimized(&[]).flatten().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(
            array.records()[0],
            FlatRecord {
                value: 0,
                children_index: 0,
                end_of_list: true
            }
        );
    }

    #[test]
    fn test_level_order_layout() {
        let array = optimized(&["ab", "c"]).flatten().unwrap();
        assert_eq!(chars(&array), "∅acb");
        let records = array.records();
        assert_eq!(records[0].children_index, 1);
        assert!(!records[1].end_of_list);
        assert!(records[2].end_of_list);
        assert_eq!(records[1].children_index, 3);
        assert_eq!(records[2].children_index, 0);
        assert!(records[3].end_of_list);
    }

    #[test]
    fn test_shared_node_gets_one_slot() {
        let graph = optimized(&["cat", "bat"]);
        let array = graph.flatten().unwrap();

        assert_eq!(chars(&array), "∅cbat");
        assert_eq!(array.len(), graph.reachable().len());
        let records = array.records();
        assert_eq!(records[1].children_index, 3);
        assert_eq!(records[2].children_index, 3);
        assert_eq!(records[3].children_index, 4);
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let graph = optimized(&["tap", "taps", "top", "tops", "cap", "caps"]);
        assert_eq!(graph.flatten().unwrap(), graph.flatten().unwrap());
    }

    #[test]
    fn test_flatten_requires_optimize() {
        let mut graph = WordGraph::new();
        graph.insert("word").unwrap();
        assert!(matches!(graph.flatten(), Err(Error::NotOptimized)));
    }
}
