//! Split: partition a source file into ordered, size-bounded segments.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use splitsum_error::{Result, SplitsumError};
use splitsum_types::{Segment, SegmentCatalog};
use tracing::{debug, info};

/// Decimal digits needed for the zero-padded part counter: one digit
/// for a single part, otherwise `ceil(log10(part_count))`.
fn pad_width(part_count: u64) -> usize {
    if part_count <= 1 {
        return 1;
    }
    let mut width = 0;
    let mut highest = part_count - 1;
    while highest > 0 {
        width += 1;
        highest /= 10;
    }
    width
}

fn part_path(prefix: &Path, counter: u64, width: usize) -> PathBuf {
    PathBuf::from(format!("{}.part.{counter:0width$}", prefix.display()))
}

/// Split the file at `source` into segments of at most `max_size`
/// bytes, named `<prefix>.part.<counter>` with a zero-padded counter.
///
/// The source is read sequentially in strict offset order; each chunk
/// is written verbatim before its descriptor is appended to the
/// catalog, so the returned catalog reflects exactly what is on disk.
/// Concatenating the parts in catalog order reproduces the source
/// byte-for-byte. A zero-length source yields one zero-length segment.
///
/// Refuses to run, before creating anything, if any target part name
/// already exists. Idempotence by refusal, not by overwrite.
///
/// # Errors
///
/// [`SplitsumError::InvalidChunkSize`] when `max_size` is zero,
/// [`SplitsumError::NotAFile`] when the source is not a regular file,
/// [`SplitsumError::PartExists`] on a naming collision, and
/// [`SplitsumError::Io`] for filesystem failures.
pub fn split(
    source: impl AsRef<Path>,
    prefix: impl AsRef<Path>,
    max_size: u64,
) -> Result<SegmentCatalog> {
    let source = source.as_ref();
    let prefix = prefix.as_ref();

    if max_size == 0 {
        return Err(SplitsumError::InvalidChunkSize);
    }

    let metadata =
        std::fs::metadata(source).map_err(|error| SplitsumError::io(source, error))?;
    if !metadata.is_file() {
        return Err(SplitsumError::NotAFile(source.to_path_buf()));
    }

    let total = metadata.len();
    let part_count = (total.div_ceil(max_size)).max(1);
    let width = pad_width(part_count);

    // Collision pre-check over every target name, before the first
    // write. A hit aborts with no partial output on disk.
    for counter in 0..part_count {
        let target = part_path(prefix, counter, width);
        if target.exists() {
            return Err(SplitsumError::PartExists(target));
        }
    }

    info!(
        source = %source.display(),
        total_bytes = total,
        max_size,
        part_count,
        "splitting file"
    );

    let mut reader =
        File::open(source).map_err(|error| SplitsumError::io(source, error))?;
    let mut catalog = SegmentCatalog::new();

    for counter in 0..part_count {
        let target = part_path(prefix, counter, width);
        // create_new closes the race between the pre-check and here.
        let mut writer = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .map_err(|error| match error.kind() {
                io::ErrorKind::AlreadyExists => SplitsumError::PartExists(target.clone()),
                _ => SplitsumError::io(&target, error),
            })?;

        let written = io::copy(&mut (&mut reader).take(max_size), &mut writer)
            .map_err(|error| SplitsumError::io(&target, error))?;
        writer
            .sync_all()
            .map_err(|error| SplitsumError::io(&target, error))?;

        debug!(part = %target.display(), bytes = written, "wrote segment");
        catalog.push(Segment::new(target, written));
    }

    info!(parts = catalog.len(), "split complete");
    Ok(catalog)
}

/// Build a catalog from an ordered list of existing segment paths,
/// reading each segment's length from filesystem metadata.
///
/// The caller's ordering is preserved verbatim: it represents original
/// byte order for a subsequent merge or verify.
///
/// # Errors
///
/// [`SplitsumError::Io`] when a path cannot be stat'd.
pub fn catalog_from_paths<I, P>(paths: I) -> Result<SegmentCatalog>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut catalog = SegmentCatalog::new();
    for path in paths {
        let path = path.as_ref();
        let metadata =
            std::fs::metadata(path).map_err(|error| SplitsumError::io(path, error))?;
        catalog.push(Segment::new(path, metadata.len()));
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_width_follows_part_count() {
        assert_eq!(pad_width(0), 1);
        assert_eq!(pad_width(1), 1);
        assert_eq!(pad_width(2), 1);
        assert_eq!(pad_width(10), 1);
        assert_eq!(pad_width(11), 2);
        assert_eq!(pad_width(100), 2);
        assert_eq!(pad_width(101), 3);
    }

    #[test]
    fn part_path_zero_pads_counter() {
        let path = part_path(Path::new("/tmp/out"), 7, 3);
        assert_eq!(path, Path::new("/tmp/out.part.007"));
    }

    #[test]
    fn split_rejects_zero_chunk_size() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, b"data").unwrap();
        let err = split(&source, dir.path().join("out"), 0).unwrap_err();
        assert!(matches!(err, SplitsumError::InvalidChunkSize));
    }

    #[test]
    fn split_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = split(dir.path().join("absent"), dir.path().join("out"), 4).unwrap_err();
        assert!(matches!(err, SplitsumError::Io { .. }));
    }

    #[test]
    fn split_rejects_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = split(dir.path(), dir.path().join("out"), 4).unwrap_err();
        assert!(matches!(err, SplitsumError::NotAFile(_)));
    }

    #[test]
    fn zero_length_source_yields_one_empty_segment() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("empty.bin");
        std::fs::write(&source, b"").unwrap();

        let catalog = split(&source, dir.path().join("empty"), 16).unwrap();
        assert_eq!(catalog.len(), 1);
        let segment = catalog.iter().next().unwrap();
        assert_eq!(segment.length(), 0);
        assert_eq!(std::fs::read(segment.path()).unwrap(), b"");
    }

    #[test]
    fn collision_refusal_leaves_existing_part_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, b"ABCDEFGHIJ").unwrap();
        let prefix = dir.path().join("out");

        // Occupy the *last* target name; nothing at all may be written.
        let occupied = dir.path().join("out.part.2");
        std::fs::write(&occupied, b"precious").unwrap();

        let err = split(&source, &prefix, 4).unwrap_err();
        assert!(matches!(err, SplitsumError::PartExists(_)));
        assert_eq!(std::fs::read(&occupied).unwrap(), b"precious");
        assert!(!dir.path().join("out.part.0").exists());
        assert!(!dir.path().join("out.part.1").exists());
    }

    #[test]
    fn exact_multiple_produces_full_final_segment() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, b"ABCDEFGH").unwrap();

        let catalog = split(&source, dir.path().join("out"), 4).unwrap();
        let lengths: Vec<u64> = catalog.iter().map(|s| s.length()).collect();
        assert_eq!(lengths, [4, 4]);
    }
}
