//! Fixed-record artifact format
//!
//! File format:
//! ```text
//! [RECORD: 9 bytes] repeated once per slot, in slot order
//!   - value: 4 bytes (u32 LE, Unicode scalar; 0 at the root)
//!   - children_index: 4 bytes (u32 LE, slot of first child; 0 = none)
//!   - end_of_list: 1 byte (0 or 1)
//! ```
//!
//! There is no header and no record count: readers know the record size
//! and read to end of file.

use crate::flat::{FlatArray, FlatRecord};
use crate::trie::WordGraph;
use crate::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Size in bytes of one encoded record
pub const RECORD_SIZE: usize = 9;

/// Encode an array into its on-disk byte form
pub fn encode(array: &FlatArray) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(array.len() * RECORD_SIZE);
    for record in array.iter() {
        buf.put_u32_le(record.value);
        buf.put_u32_le(record.children_index);
        buf.put_u8(u8::from(record.end_of_list));
    }
    buf.to_vec()
}

/// Decode an artifact produced by [`encode`]
pub fn decode(mut data: &[u8]) -> Result<FlatArray> {
    if data.len() % RECORD_SIZE != 0 {
        return Err(Error::Corruption(format!(
            "artifact length {} is not a multiple of {}",
            data.len(),
            RECORD_SIZE
        )));
    }

    let mut records = Vec::with_capacity(data.len() / RECORD_SIZE);
    while data.has_remaining() {
        let slot = records.len();
        let value = data.get_u32_le();
        let children_index = data.get_u32_le();
        let end_of_list = match data.get_u8() {
            0 => false,
            1 => true,
            other => {
                return Err(Error::Corruption(format!(
                    "slot {}: invalid end-of-list byte {}",
                    slot, other
                )))
            }
        };
        if char::from_u32(value).is_none() {
            return Err(Error::Corruption(format!(
                "slot {}: {:#x} is not a Unicode scalar value",
                slot, value
            )));
        }
        records.push(FlatRecord {
            value,
            children_index,
            end_of_list,
        });
    }

    Ok(FlatArray::from_records(records))
}

/// Write an array to `path`, returning the number of bytes written.
///
/// The file is created (or truncated) once and closed on return, including
/// on the first I/O error.
pub fn write_artifact(array: &FlatArray, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let data = encode(array);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&data)?;
    writer.flush()?;

    info!(path = %path.display(), bytes = data.len(), "artifact written");
    Ok(data.len() as u64)
}

/// Read and decode an artifact from `path`
pub fn read_artifact(path: impl AsRef<Path>) -> Result<FlatArray> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    decode(&data)
}

impl WordGraph {
    /// Flatten this graph and write the encoded artifact to `path`.
    ///
    /// The graph itself is not modified, so a failed write can be retried
    /// against another destination.
    pub fn flatten_and_encode(&self, path: impl AsRef<Path>) -> Result<FlatArray> {
        let array = self.flatten()?;
        write_artifact(&array, path)?;
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> FlatArray {
        FlatArray::from_records(vec![
            FlatRecord {
                value: 0,
                children_index: 1,
                end_of_list: true,
            },
            FlatRecord {
                value: u32::from('é'),
                children_index: 0,
                end_of_list: true,
            },
        ])
    }

    #[test]
    fn test_record_layout() {
        let bytes = encode(&sample());
        assert_eq!(bytes.len(), 2 * RECORD_SIZE);
        assert_eq!(&bytes[0..9], &[0, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert_eq!(&bytes[9..13], &0xe9u32.to_le_bytes());
        assert_eq!(&bytes[13..17], &[0, 0, 0, 0]);
        assert_eq!(bytes[17], 1);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let array = sample();
        assert_eq!(decode(&encode(&array)).unwrap(), array);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_partial_record() {
        let mut bytes = encode(&sample());
        bytes.pop();
        assert!(matches!(decode(&bytes), Err(Error::Corruption(_))));
    }

    #[test]
    fn test_decode_rejects_bad_flag() {
        let mut bytes = encode(&sample());
        bytes[8] = 7;
        assert!(matches!(decode(&bytes), Err(Error::Corruption(_))));
    }

    #[test]
    fn test_decode_rejects_surrogate() {
        let mut bytes = encode(&sample());
        bytes[9..13].copy_from_slice(&0xd800u32.to_le_bytes());
        assert!(matches!(decode(&bytes), Err(Error::Corruption(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.wg");

        let written = write_artifact(&sample(), &path).unwrap();
        assert_eq!(written, 2 * RECORD_SIZE as u64);
        assert_eq!(read_artifact(&path).unwrap(), sample());
    }

    #[test]
    fn test_read_artifact_files() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.wg");
        std::fs::write(&empty, b"").unwrap();
        assert!(read_artifact(&empty).unwrap().is_empty());

        let truncated = dir.path().join("truncated.wg");
        std::fs::write(&truncated, &encode(&sample())[..RECORD_SIZE + 3]).unwrap();
        assert!(matches!(read_artifact(&truncated), Err(Error::Corruption(_))));

        let missing = dir.path().join("missing.wg");
        assert!(matches!(read_artifact(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn test_write_failure_leaves_graph_usable() {
        let dir = tempdir().unwrap();
        let mut graph = WordGraph::new();
        graph.insert("abc").unwrap();
        graph.optimize().unwrap();

        let missing = dir.path().join("no-such-dir").join("out.wg");
        assert!(matches!(
            graph.flatten_and_encode(&missing),
            Err(Error::Io(_))
        ));

        let retry = dir.path().join("out.wg");
        let array = graph.flatten_and_encode(&retry).unwrap();
        assert_eq!(read_artifact(&retry).unwrap(), array);
    }
}
