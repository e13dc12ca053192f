//! Word insertion

use super::{GraphState, WordGraph};
use crate::model::{Node, NodeId};
use crate::{Error, Result};
use serde::Serialize;
use std::io::BufRead;
use tracing::{debug, warn};

/// Outcome of loading a word list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VocabularyReport {
    /// Lines handed to [`WordGraph::insert`]
    pub inserted: usize,
    /// Lines rejected as malformed and skipped
    pub skipped: usize,
}

impl WordGraph {
    /// Insert a word, one code point per level.
    ///
    /// Existing nodes along the path are reused, so inserting the same word
    /// twice leaves the graph unchanged. The empty string is a no-op.
    pub fn insert(&mut self, word: &str) -> Result<()> {
        self.insert_chars(word.chars())
    }

    /// Insert a word given as a sequence of code points
    pub fn insert_chars(&mut self, word: impl IntoIterator<Item = char>) -> Result<()> {
        self.ensure_usable()?;
        if self.state == GraphState::Optimized {
            return Err(Error::AlreadyOptimized);
        }

        // Validate everything before touching the graph.
        let word: Vec<char> = word.into_iter().collect();
        if word.contains(&Node::SENTINEL) {
            return Err(Error::MalformedWord(format!(
                "{:?} contains U+0000",
                word.iter().collect::<String>()
            )));
        }

        let mut current = NodeId::ROOT;
        for &value in &word {
            current = self.child_for(current, value);
        }
        if current != NodeId::ROOT {
            self.node_mut(current).end_of_word = true;
        }
        Ok(())
    }

    /// Insert a word given as raw bytes, rejecting invalid UTF-8
    pub fn insert_bytes(&mut self, word: &[u8]) -> Result<()> {
        let word = std::str::from_utf8(word)
            .map_err(|e| Error::MalformedWord(format!("invalid UTF-8: {}", e)))?;
        self.insert(word)
    }

    /// Insert every line of a word list.
    ///
    /// Lines are split on `\n` with a trailing `\r` trimmed; blank lines are
    /// ignored. With `skip_malformed` set, lines that fail validation are
    /// logged and counted instead of aborting the load.
    pub fn insert_lines<R: BufRead>(
        &mut self,
        reader: R,
        skip_malformed: bool,
    ) -> Result<VocabularyReport> {
        let mut report = VocabularyReport::default();

        for (number, line) in reader.split(b'\n').enumerate() {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.is_empty() {
                continue;
            }

            match self.insert_bytes(&line) {
                Ok(()) => report.inserted += 1,
                Err(Error::MalformedWord(reason)) if skip_malformed => {
                    warn!(line = number + 1, %reason, "skipping malformed word");
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            inserted = report.inserted,
            skipped = report.skipped,
            nodes = self.len(),
            "vocabulary loaded"
        );
        Ok(report)
    }

    /// Find the child of `parent` holding `value`, creating it if missing
    fn child_for(&mut self, parent: NodeId, value: char) -> NodeId {
        let Some(head) = self.node(parent).children else {
            let child = self.alloc(value, true);
            self.node_mut(child).parents.insert(parent);
            self.node_mut(parent).children = Some(child);
            return child;
        };

        let mut tail = head;
        loop {
            let node = self.node(tail);
            if node.value == value {
                return tail;
            }
            match node.next {
                Some(next) => tail = next,
                None => break,
            }
        }

        // Only first children record their parent; later siblings are
        // reached through the chain.
        let child = self.alloc(value, false);
        self.node_mut(tail).next = Some(child);
        child
    }
}
