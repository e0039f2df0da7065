use std::fmt;
use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};

use crate::error::TypeError;

/// Content-addressed identifier for a stored document object.
///
/// A `ContentHash` is the SHA-1 digest of a file's raw bytes. Identical
/// content always produces the same `ContentHash`, making objects
/// deduplicatable across archives. The canonical textual form is 40
/// lowercase hex characters, which is also the serde representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 20]);

impl ContentHash {
    /// Compute a `ContentHash` from a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Compute a `ContentHash` by streaming a reader to completion.
    ///
    /// Used to hash staged uploads without buffering the whole file.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut hasher = Sha1::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(Self(hasher.finalize().into()))
    }

    /// Create a `ContentHash` from a pre-computed digest.
    pub fn from_digest(digest: [u8; 20]) -> Self {
        Self(digest)
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex representation (40 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters), for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string. Uppercase input is accepted and folded.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut digest = [0u8; 20];
        digest.copy_from_slice(&bytes);
        Ok(Self(digest))
    }

    /// The two-character shard prefix used by the object store layout.
    pub fn shard_prefix(&self) -> String {
        hex::encode(&self.0[..1])
    }

    /// The remainder of the hex form after the shard prefix.
    pub fn shard_rest(&self) -> String {
        hex::encode(&self.0[1..])
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short_hex())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ContentHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serialized as the 40-char hex string so hashes read the same in JSON
// bodies, URLs, and log lines.
impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_deterministic() {
        let id1 = ContentHash::from_bytes(b"hello world");
        let id2 = ContentHash::from_bytes(b"hello world");
        assert_eq!(id1, id2);
    }

    #[test]
    fn different_data_produces_different_hashes() {
        assert_ne!(
            ContentHash::from_bytes(b"hello"),
            ContentHash::from_bytes(b"world")
        );
    }

    #[test]
    fn known_sha1_vector() {
        // SHA-1("hello")
        let hash = ContentHash::from_bytes(b"hello");
        assert_eq!(hash.to_hex(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    }

    #[test]
    fn reader_matches_slice() {
        let data = b"streaming and slice hashing must agree".to_vec();
        let from_slice = ContentHash::from_bytes(&data);
        let from_reader = ContentHash::from_reader(&data[..]).unwrap();
        assert_eq!(from_slice, from_reader);
    }

    #[test]
    fn hex_roundtrip() {
        let hash = ContentHash::from_bytes(b"roundtrip");
        let parsed = ContentHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = ContentHash::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 20,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(matches!(
            ContentHash::from_hex("zz").unwrap_err(),
            TypeError::InvalidHex(_)
        ));
    }

    #[test]
    fn display_is_full_lowercase_hex() {
        let hash = ContentHash::from_bytes(b"display");
        let text = format!("{hash}");
        assert_eq!(text.len(), 40);
        assert_eq!(text, text.to_lowercase());
    }

    #[test]
    fn shard_layout_splits_after_two_chars() {
        let hash = ContentHash::from_bytes(b"hello");
        assert_eq!(hash.shard_prefix(), "aa");
        assert_eq!(
            hash.shard_rest(),
            "f4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
        );
        assert_eq!(format!("{}{}", hash.shard_prefix(), hash.shard_rest()), hash.to_hex());
    }

    #[test]
    fn serde_roundtrip_as_hex_string() {
        let hash = ContentHash::from_bytes(b"serde");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
        let parsed: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn serde_rejects_malformed() {
        assert!(serde_json::from_str::<ContentHash>("\"not-hex\"").is_err());
    }
}
