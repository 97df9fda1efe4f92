//! Unified error type for the splitsum workspace.
//!
//! Every fallible core operation returns [`Result`]. Integrity
//! mismatches found during verification are *not* errors — they are
//! per-segment statuses in the verification report. Only conditions
//! that abort an operation outright live here.

use std::path::PathBuf;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, SplitsumError>;

/// All fatal failure modes of split, merge, and checksum operations.
#[derive(Debug, thiserror::Error)]
pub enum SplitsumError {
    /// An underlying filesystem operation failed. The path identifies
    /// the file being read or written when the failure occurred.
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The split source exists but is not a regular file.
    #[error("'{}' is not a regular file", .0.display())]
    NotAFile(PathBuf),

    /// The maximum segment size must be strictly positive.
    #[error("maximum segment size must be greater than zero")]
    InvalidChunkSize,

    /// A split output filename already exists. Split refuses to
    /// overwrite and aborts before writing anything.
    #[error("segment file '{}' already exists, refusing to overwrite", .0.display())]
    PartExists(PathBuf),

    /// The manifest destination already exists. Generation refuses to
    /// overwrite an existing manifest.
    #[error("manifest '{}' already exists, refusing to overwrite", .0.display())]
    ManifestExists(PathBuf),

    /// The merge destination is one of the input segments.
    #[error("merge destination '{}' is also an input segment", .0.display())]
    DestinationIsInput(PathBuf),

    /// A manifest line did not parse as `<hex digest>  <name>`. This
    /// aborts the whole verification run, it is not a per-segment
    /// failure.
    #[error("malformed manifest '{}' at line {line}", .path.display())]
    MalformedManifest { path: PathBuf, line: usize },
}

impl SplitsumError {
    /// Attach a path to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
