//! Flat, index-addressed encoding of a minimized graph
//!
//! Every distinct node gets one [`FlatRecord`]. A record points at the slot
//! of its first child; the remaining children follow in consecutive slots
//! up to and including the first record with `end_of_list` set.

mod flatten;
mod record;

pub use flatten::flatten;
pub use record::{ChildRun, FlatArray, FlatRecord};
