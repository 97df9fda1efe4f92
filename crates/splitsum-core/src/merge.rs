//! Merge: concatenate segments back into the original byte stream.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use splitsum_error::{Result, SplitsumError};
use splitsum_types::SegmentCatalog;
use tracing::{debug, info};

/// Transfer buffer size for segment-to-destination copies. Fixed so
/// merge memory stays flat no matter how large individual segments
/// are.
const TRANSFER_BUF_SIZE: usize = 4 * 1024 * 1024;

/// Reconstruct a file at `destination` by concatenating every segment
/// of `catalog`, fully and in catalog order.
///
/// The destination is created (or truncated if it already exists as a
/// non-segment file). There is no all-or-nothing guarantee: bytes
/// already written when a later segment fails stay on disk, and a
/// retry is a whole new invocation.
///
/// # Errors
///
/// [`SplitsumError::DestinationIsInput`] when `destination` is one of
/// the catalog's segment paths, [`SplitsumError::Io`] when a segment
/// cannot be opened or the destination cannot be created or written.
pub fn merge(catalog: &SegmentCatalog, destination: impl AsRef<Path>) -> Result<u64> {
    let destination = destination.as_ref();

    if catalog.contains_path(destination) {
        return Err(SplitsumError::DestinationIsInput(
            destination.to_path_buf(),
        ));
    }

    info!(
        destination = %destination.display(),
        parts = catalog.len(),
        expected_bytes = catalog.total_length(),
        "merging segments"
    );

    let mut writer =
        File::create(destination).map_err(|error| SplitsumError::io(destination, error))?;
    let mut buffer = vec![0_u8; TRANSFER_BUF_SIZE];
    let mut total_written = 0_u64;

    for segment in catalog {
        let mut reader = File::open(segment.path())
            .map_err(|error| SplitsumError::io(segment.path(), error))?;
        let mut segment_written = 0_u64;

        loop {
            let read = reader
                .read(&mut buffer)
                .map_err(|error| SplitsumError::io(segment.path(), error))?;
            if read == 0 {
                break;
            }
            writer
                .write_all(&buffer[..read])
                .map_err(|error| SplitsumError::io(destination, error))?;
            segment_written += read as u64;
        }

        debug!(part = %segment.path().display(), bytes = segment_written, "appended segment");
        total_written += segment_written;
    }

    writer
        .sync_all()
        .map_err(|error| SplitsumError::io(destination, error))?;

    info!(bytes = total_written, "merge complete");
    Ok(total_written)
}
