//! Fixed-length digest value with lowercase-hex encoding.
//!
//! The manifest format stores digests as 64 lowercase hex characters,
//! most-significant byte first. Encoding here must stay bit-exact:
//! manifests written by one build are compared byte-for-byte by
//! another.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length in bytes of a segment digest (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// A hex digest string failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexDigestError {
    /// The string was not exactly `2 * DIGEST_LEN` characters.
    #[error("digest must be 64 hex characters, got {0}")]
    BadLength(usize),
    /// A character outside `[0-9a-fA-F]` appeared at the given offset.
    #[error("invalid hex character at offset {0}")]
    BadCharacter(usize),
}

/// A 32-byte cryptographic digest of a segment's full content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex encoding, most-significant byte first.
    pub fn to_hex(&self) -> String {
        use std::fmt::Write as _;
        let mut hex = String::with_capacity(2 * DIGEST_LEN);
        for byte in self.0 {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }

    /// Decode a 64-character hex string. Accepts upper and lower case.
    pub fn from_hex(hex: &str) -> Result<Self, HexDigestError> {
        if hex.len() != 2 * DIGEST_LEN {
            return Err(HexDigestError::BadLength(hex.len()));
        }
        let mut bytes = [0_u8; DIGEST_LEN];
        for (index, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_nibble(chunk[0]).ok_or(HexDigestError::BadCharacter(2 * index))?;
            let lo = hex_nibble(chunk[1]).ok_or(HexDigestError::BadCharacter(2 * index + 1))?;
            bytes[index] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = HexDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(D::Error::custom)
    }
}
