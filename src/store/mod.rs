//! Binary artifact encoding
//!
//! The artifact is a headerless sequence of fixed-size records and is
//! written and read in one go.

mod encoder;

pub use encoder::{decode, encode, read_artifact, write_artifact, RECORD_SIZE};
