//! Core type definitions for splitsum: segment digests, segment
//! descriptors, and the ordered segment catalog.
//!
//! These types carry metadata only — no file content. A catalog is
//! built by one operation (split, merge, or verify), consumed by that
//! operation, and discarded; only the manifest file persists.

mod catalog;
mod digest_value;

pub use catalog::{Segment, SegmentCatalog};
pub use digest_value::{DIGEST_LEN, Digest, HexDigestError};
