//! Integrity subsystem: manifest generation and verification.
//!
//! A manifest is UTF-8 text, one record per segment in catalog order:
//!
//! ```text
//! <64 lowercase hex chars><two spaces><segment basename><newline>
//! ```
//!
//! No header, no trailing metadata, no blank lines. The format is the
//! durable contract: manifests written here must verify against any
//! other implementation of the same format, byte-for-byte.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use splitsum_error::{Result, SplitsumError};
use splitsum_types::{Digest, SegmentCatalog};
use tracing::{debug, info, warn};

use crate::digest::digest_bytes;

/// Per-segment verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// A manifest record with a matching name exists and its digest
    /// equals the recomputed digest.
    Ok,
    /// A matching record exists but the digests differ: the content
    /// was corrupted, or the manifest is stale.
    Mismatch,
    /// No manifest record carries the segment's name: the manifest is
    /// incomplete, or the segment was renamed.
    NotFound,
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Mismatch => f.write_str("mismatch"),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

/// One row of the verification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStatus {
    /// Segment basename, as matched against the manifest.
    pub name: String,
    pub outcome: VerifyOutcome,
}

/// Full result of one verification run: one status per segment, in
/// catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub segments: Vec<SegmentStatus>,
}

impl VerifyReport {
    /// Number of segments that verified `ok`.
    pub fn passed(&self) -> usize {
        self.segments
            .iter()
            .filter(|status| status.outcome == VerifyOutcome::Ok)
            .count()
    }

    pub fn total(&self) -> usize {
        self.segments.len()
    }

    /// Whether every segment verified `ok`.
    pub fn all_ok(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Compute and attach a digest for every segment, writing one manifest
/// record per segment to a freshly created file at `manifest_path`.
///
/// Two explicit steps per segment: hash the content, then emit the
/// record. Each segment is read fully into memory; the split step
/// already bounds segment size, so this never holds more than one
/// segment's bytes at a time.
///
/// # Errors
///
/// [`SplitsumError::ManifestExists`] when `manifest_path` already
/// exists (no silent overwrite), [`SplitsumError::Io`] when a segment
/// cannot be read or the manifest cannot be written.
pub fn write_manifest(
    catalog: &mut SegmentCatalog,
    manifest_path: impl AsRef<Path>,
) -> Result<()> {
    let manifest_path = manifest_path.as_ref();

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(manifest_path)
        .map_err(|error| match error.kind() {
            io::ErrorKind::AlreadyExists => {
                SplitsumError::ManifestExists(manifest_path.to_path_buf())
            }
            _ => SplitsumError::io(manifest_path, error),
        })?;
    let mut writer = BufWriter::new(file);

    info!(
        manifest = %manifest_path.display(),
        parts = catalog.len(),
        "writing manifest"
    );

    for segment in catalog.iter_mut() {
        let content = std::fs::read(segment.path())
            .map_err(|error| SplitsumError::io(segment.path(), error))?;
        let digest = digest_bytes(&content);
        segment.set_digest(digest);

        writeln!(writer, "{}  {}", digest.to_hex(), segment.basename())
            .map_err(|error| SplitsumError::io(manifest_path, error))?;
        debug!(part = %segment.path().display(), digest = %digest, "hashed segment");
    }

    writer
        .into_inner()
        .map_err(|error| SplitsumError::io(manifest_path, error.into_error()))?
        .sync_all()
        .map_err(|error| SplitsumError::io(manifest_path, error))?;
    Ok(())
}

/// A parsed manifest record.
struct ManifestRecord {
    digest: Digest,
    name: String,
}

/// Parse every manifest line as `<hex>  <name>`. Any line that is not
/// exactly two whitespace-separated tokens, or whose first token is
/// not a 64-character hex digest, aborts the whole run.
fn parse_manifest(manifest_path: &Path) -> Result<Vec<ManifestRecord>> {
    let text = std::fs::read_to_string(manifest_path)
        .map_err(|error| SplitsumError::io(manifest_path, error))?;

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let malformed = || SplitsumError::MalformedManifest {
            path: manifest_path.to_path_buf(),
            line: index + 1,
        };

        let mut tokens = line.split_whitespace();
        let (hex, name) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(hex), Some(name), None) => (hex, name),
            _ => return Err(malformed()),
        };
        let digest = Digest::from_hex(hex).map_err(|_| malformed())?;
        records.push(ManifestRecord {
            digest,
            name: name.to_owned(),
        });
    }
    Ok(records)
}

/// Verify every segment of `catalog` against the manifest at
/// `manifest_path`, matching records by segment basename.
///
/// Recomputed digests are attached to the catalog's descriptors as a
/// side product. Per-segment failures never halt the run: every
/// segment gets exactly one [`VerifyOutcome`] in the report, in
/// catalog order.
///
/// # Errors
///
/// [`SplitsumError::MalformedManifest`] when any manifest record is
/// unparseable (fatal for the whole run, not a per-segment failure),
/// [`SplitsumError::Io`] when the manifest or a segment cannot be
/// read.
pub fn verify(
    catalog: &mut SegmentCatalog,
    manifest_path: impl AsRef<Path>,
) -> Result<VerifyReport> {
    let manifest_path = manifest_path.as_ref();
    let records = parse_manifest(manifest_path)?;

    info!(
        manifest = %manifest_path.display(),
        records = records.len(),
        parts = catalog.len(),
        "verifying segments"
    );

    let mut report = VerifyReport::default();
    for segment in catalog.iter_mut() {
        let content = std::fs::read(segment.path())
            .map_err(|error| SplitsumError::io(segment.path(), error))?;
        let actual = digest_bytes(&content);
        segment.set_digest(actual);

        let name = segment.basename();
        let outcome = match records.iter().find(|record| record.name == name) {
            Some(record) if record.digest == actual => VerifyOutcome::Ok,
            Some(_) => VerifyOutcome::Mismatch,
            None => VerifyOutcome::NotFound,
        };
        if outcome != VerifyOutcome::Ok {
            warn!(part = %segment.path().display(), %outcome, "segment failed verification");
        }
        report.segments.push(SegmentStatus { name, outcome });
    }

    info!(
        passed = report.passed(),
        total = report.total(),
        "verification complete"
    );
    Ok(report)
}
