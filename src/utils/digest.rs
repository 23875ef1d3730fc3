use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};

use crate::error::ObjectError;

/// Width of a raw digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Width of a digest rendered as hex.
pub const HEX_LEN: usize = DIGEST_LEN * 2;

/// SHA-256 digest of an encoded object, kept in binary form.
///
/// Hex only shows up at the edges: `Display`, `FromStr` and the loose
/// object path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; DIGEST_LEN]);

impl ObjectId {
    pub const ZERO: ObjectId = ObjectId([0u8; DIGEST_LEN]);

    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        ObjectId(bytes)
    }

    /// Build an id from a slice that must be exactly `DIGEST_LEN` long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; DIGEST_LEN] = bytes.try_into().ok()?;
        Some(ObjectId(raw))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Split the hex form into the shard directory and file name.
    pub fn shard(&self) -> (String, String) {
        let hex = self.to_hex();
        let (dir_name, file_name) = hex.split_at(2);
        (dir_name.to_string(), file_name.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HEX_LEN {
            return Err(ObjectError::InvalidObjectId(s.to_string()));
        }
        let mut raw = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut raw).map_err(|_| ObjectError::InvalidObjectId(s.to_string()))?;
        Ok(ObjectId(raw))
    }
}

/// Digest an arbitrary byte sequence.
pub fn digest(bytes: &[u8]) -> ObjectId {
    digest_parts(&[bytes])
}

/// Digest the concatenation of `parts` without building it in memory.
pub fn digest_parts(parts: &[&[u8]]) -> ObjectId {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }

    let sha256_result = hasher.finalize();
    let mut sha256 = [0u8; DIGEST_LEN];
    sha256.copy_from_slice(&sha256_result[..]);
    ObjectId(sha256)
}
