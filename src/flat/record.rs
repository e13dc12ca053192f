//! Flat record and array types

use serde::{Deserialize, Serialize};

/// One slot of the flattened graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Unicode scalar value of the node (0 at the root)
    pub value: u32,
    /// Slot of the first child, or 0 when the node has no children
    pub children_index: u32,
    /// Set on the last record of a sibling run
    pub end_of_list: bool,
}

impl FlatRecord {
    pub fn new(value: char, end_of_list: bool) -> Self {
        FlatRecord {
            value: u32::from(value),
            children_index: 0,
            end_of_list,
        }
    }

    /// The node's value as a `char`, if it is a valid scalar value
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.value)
    }

    /// Slot 0 is always the root, which is nobody's child, so 0 means "none"
    pub fn has_children(&self) -> bool {
        self.children_index != 0
    }
}

/// The flattened graph, slot 0 being the root
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatArray {
    records: Vec<FlatRecord>,
}

impl FlatArray {
    pub fn from_records(records: Vec<FlatRecord>) -> Self {
        FlatArray { records }
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FlatRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&FlatRecord> {
        self.records.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlatRecord> {
        self.records.iter()
    }

    /// Sibling run holding the children of `slot`.
    ///
    /// The run stops at the first `end_of_list` record or at the end of the
    /// array, whichever comes first.
    pub fn children(&self, slot: usize) -> ChildRun<'_> {
        let cursor = self
            .records
            .get(slot)
            .filter(|r| r.has_children())
            .map(|r| r.children_index as usize);
        ChildRun {
            records: &self.records,
            cursor,
        }
    }
}

/// Iterator over `(slot, record)` pairs of one sibling run
pub struct ChildRun<'a> {
    records: &'a [FlatRecord],
    cursor: Option<usize>,
}

impl<'a> Iterator for ChildRun<'a> {
    type Item = (usize, &'a FlatRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let Some(record) = self.records.get(slot) else {
            self.cursor = None;
            return None;
        };
        self.cursor = if record.end_of_list {
            None
        } else {
            Some(slot + 1)
        };
        Some((slot, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: char, children_index: u32, end_of_list: bool) -> FlatRecord {
        FlatRecord {
            value: u32::from(value),
            children_index,
            end_of_list,
        }
    }

    #[test]
    fn test_children_run_stops_at_end_of_list() {
        let array = FlatArray::from_records(vec![
            record('\0', 1, true),
            record('a', 0, false),
            record('b', 0, true),
            record('c', 0, true),
        ]);
        let run: Vec<usize> = array.children(0).map(|(slot, _)| slot).collect();
        assert_eq!(run, vec![1, 2]);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let array = FlatArray::from_records(vec![record('\0', 0, true)]);
        assert_eq!(array.children(0).count(), 0);
        assert_eq!(array.children(7).count(), 0);
    }

    #[test]
    fn test_unterminated_run_stops_at_array_end() {
        let array = FlatArray::from_records(vec![record('\0', 1, true), record('a', 0, false)]);
        assert_eq!(array.children(0).count(), 1);
    }
}
