//! Digest engine: SHA-256 over arbitrary bytes.
//!
//! The algorithm is fixed system-wide. Manifests store raw hex of
//! these digests and are compared byte-for-byte, so swapping the hash
//! function would silently invalidate every existing manifest.

use sha2::{Digest as _, Sha256};
use splitsum_types::Digest;

/// Compute the SHA-256 digest of `bytes`.
///
/// Pure and total: deterministic for identical input, defined for the
/// empty sequence, no failure modes.
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Digest::new(hasher.finalize().into())
}
