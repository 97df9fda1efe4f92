//! Chunking, reassembly, and integrity engine.
//!
//! Three composing pieces, leaves first:
//!
//! - [`digest`] — SHA-256 digest of an arbitrary byte sequence.
//! - [`split`] / [`merge`] — partition a file into ordered,
//!   size-bounded segments, and concatenate segments back into the
//!   original byte stream.
//! - [`manifest`] — write a digest manifest for a segment catalog and
//!   verify a catalog against an existing manifest.
//!
//! All operations are single-threaded, synchronous, and blocking. Each
//! invocation owns its catalog and buffers exclusively; nothing here
//! shares mutable state. Memory stays bounded by the merge transfer
//! buffer and by individual segment size — the whole source file is
//! never held in memory at once.

pub mod digest;
pub mod manifest;
pub mod merge;
pub mod split;

pub use digest::digest_bytes;
pub use manifest::{SegmentStatus, VerifyOutcome, VerifyReport, verify, write_manifest};
pub use merge::merge;
pub use split::{catalog_from_paths, split};
