//! Segment descriptors and the ordered segment catalog.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Digest;

/// One physical part of a split file.
///
/// A segment knows its path and byte length from the moment it is
/// created; the digest is attached later, once the integrity subsystem
/// has actually hashed the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    path: PathBuf,
    length: u64,
    digest: Option<Digest>,
}

impl Segment {
    pub fn new(path: impl Into<PathBuf>, length: u64) -> Self {
        Self {
            path: path.into(),
            length,
            digest: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name component, used for manifest records. Falls back
    /// to the full path string for paths with no final component.
    pub fn basename(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Physical size of the segment's content in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref()
    }

    /// Record the computed digest on this descriptor.
    pub fn set_digest(&mut self, digest: Digest) {
        self.digest = Some(digest);
    }
}

/// Ordered sequence of segments for one split, merge, or verify
/// operation.
///
/// Order is significant: segment `i` holds the source bytes
/// `[sum(length[0..i]), sum(length[0..i+1]))`. Segments are appended
/// strictly in production order and never reordered; the only
/// in-place mutation is attaching a digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCatalog {
    segments: Vec<Segment>,
}

impl SegmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Segment> {
        self.segments.iter_mut()
    }

    /// Sum of all segment lengths: the size of the reconstructed file.
    pub fn total_length(&self) -> u64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Whether any segment resolves to the given path.
    pub fn contains_path(&self, path: &Path) -> bool {
        self.segments.iter().any(|segment| segment.path() == path)
    }
}

impl<'a> IntoIterator for &'a SegmentCatalog {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for SegmentCatalog {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl FromIterator<Segment> for SegmentCatalog {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
