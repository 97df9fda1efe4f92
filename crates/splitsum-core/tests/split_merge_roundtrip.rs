//! End-to-end coverage of split, merge, and manifest verification.

use std::path::Path;

use proptest::prelude::*;
use splitsum_core::{catalog_from_paths, merge, split, verify, write_manifest};

fn write_fixture(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn ten_byte_file_split_at_four() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_fixture(dir.path(), "input.bin", b"ABCDEFGHIJ");
    let prefix = dir.path().join("prefix");

    let mut catalog = split(&source, &prefix, 4).unwrap();

    let lengths: Vec<u64> = catalog.iter().map(|s| s.length()).collect();
    assert_eq!(lengths, [4, 4, 2]);
    let names: Vec<String> = catalog.iter().map(|s| s.basename()).collect();
    assert_eq!(names, ["prefix.part.0", "prefix.part.1", "prefix.part.2"]);
    assert_eq!(
        std::fs::read(dir.path().join("prefix.part.0")).unwrap(),
        b"ABCD"
    );
    assert_eq!(
        std::fs::read(dir.path().join("prefix.part.1")).unwrap(),
        b"EFGH"
    );
    assert_eq!(
        std::fs::read(dir.path().join("prefix.part.2")).unwrap(),
        b"IJ"
    );

    let restored = dir.path().join("restored.bin");
    merge(&catalog, &restored).unwrap();
    assert_eq!(std::fs::read(&restored).unwrap(), b"ABCDEFGHIJ");

    let manifest = dir.path().join("prefix.sum");
    write_manifest(&mut catalog, &manifest).unwrap();
    let report = verify(&mut catalog, &manifest).unwrap();
    assert!(report.all_ok());
    assert_eq!(report.total(), 3);
}

#[test]
fn segment_count_law() {
    let cases: &[(usize, u64, usize)] = &[
        (0, 5, 1),   // zero-length source: exactly one empty segment
        (1, 5, 1),
        (5, 5, 1),   // exact fit
        (6, 5, 2),
        (10, 5, 2),  // exact multiple
        (11, 5, 3),
        (100, 7, 15),
    ];

    for &(total, chunk, expected) in cases {
        let dir = tempfile::tempdir().unwrap();
        let content = vec![0xAB_u8; total];
        let source = write_fixture(dir.path(), "input.bin", &content);
        let catalog = split(&source, dir.path().join("out"), chunk).unwrap();
        assert_eq!(
            catalog.len(),
            expected,
            "T={total} S={chunk} should give {expected} parts"
        );
        assert_eq!(catalog.total_length(), total as u64);
    }
}

#[test]
fn counter_padding_widens_with_part_count() {
    let dir = tempfile::tempdir().unwrap();
    // 23 bytes / 2-byte chunks = 12 parts, so two-digit counters.
    let source = write_fixture(dir.path(), "input.bin", &[0x42_u8; 23]);
    let catalog = split(&source, dir.path().join("wide"), 2).unwrap();

    assert_eq!(catalog.len(), 12);
    let names: Vec<String> = catalog.iter().map(|s| s.basename()).collect();
    assert_eq!(names[0], "wide.part.00");
    assert_eq!(names[9], "wide.part.09");
    assert_eq!(names[11], "wide.part.11");
}

#[test]
fn single_byte_source_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_fixture(dir.path(), "input.bin", b"X");
    let catalog = split(&source, dir.path().join("one"), 1024).unwrap();
    assert_eq!(catalog.len(), 1);

    let restored = dir.path().join("restored.bin");
    merge(&catalog, &restored).unwrap();
    assert_eq!(std::fs::read(&restored).unwrap(), b"X");
}

#[test]
fn empty_source_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_fixture(dir.path(), "input.bin", b"");
    let catalog = split(&source, dir.path().join("empty"), 8).unwrap();

    let restored = dir.path().join("restored.bin");
    merge(&catalog, &restored).unwrap();
    assert_eq!(std::fs::read(&restored).unwrap(), b"");
}

#[test]
fn rebuilt_catalog_from_paths_merges_identically() {
    let dir = tempfile::tempdir().unwrap();
    let content: Vec<u8> = (0..=255_u8).cycle().take(1000).collect();
    let source = write_fixture(dir.path(), "input.bin", &content);
    let catalog = split(&source, dir.path().join("out"), 128).unwrap();

    // Simulate a later invocation that only knows the part paths.
    let paths: Vec<_> = catalog.iter().map(|s| s.path().to_path_buf()).collect();
    let rebuilt = catalog_from_paths(&paths).unwrap();

    let restored = dir.path().join("restored.bin");
    merge(&rebuilt, &restored).unwrap();
    assert_eq!(std::fs::read(&restored).unwrap(), content);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn merge_of_split_reproduces_source(
        content in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk_size in 1_u64..512,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let source = write_fixture(dir.path(), "input.bin", &content);
        let catalog = split(&source, dir.path().join("out"), chunk_size).unwrap();

        let expected_parts = if content.is_empty() {
            1
        } else {
            (content.len() as u64).div_ceil(chunk_size) as usize
        };
        prop_assert_eq!(catalog.len(), expected_parts);

        let restored = dir.path().join("restored.bin");
        merge(&catalog, &restored).unwrap();
        prop_assert_eq!(std::fs::read(&restored).unwrap(), content);
    }
}
