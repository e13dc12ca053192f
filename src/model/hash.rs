//! Structural digest of a subgraph, using BLAKE3

use std::fmt;

/// A 32-byte BLAKE3 digest summarizing the shape and contents of a subgraph
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Digest of a node that has not been annotated yet
    pub const ZERO: ContentHash = ContentHash([0u8; 32]);

    /// Digest the concatenation of `parts`
    pub fn digest_many(parts: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        ContentHash(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 7 hex digits, enough to tell digests apart in logs
    pub fn short(&self) -> String {
        let mut prefix = hex::encode(&self.0[..4]);
        prefix.truncate(7);
        prefix
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_depends_on_content() {
        let h1 = ContentHash::digest_many(&[b"hello"]);
        let h2 = ContentHash::digest_many(&[b"hello"]);
        let h3 = ContentHash::digest_many(&[b"world"]);

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert!(!h1.is_zero());
    }

    #[test]
    fn test_digest_many_matches_concatenation() {
        let joined = ContentHash::digest_many(&[b"helloworld"]);
        let parts = ContentHash::digest_many(&[b"hello", b"world"]);
        assert_eq!(joined, parts);
    }

    #[test]
    fn test_short_prefix() {
        let h = ContentHash::digest_many(&[b"test"]);
        assert_eq!(h.short().len(), 7);
        assert!(format!("{:?}", h).contains(&h.short()));
        assert!(ContentHash::default().is_zero());
    }
}
