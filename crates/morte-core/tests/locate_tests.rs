// Integration tests for wildcard file location

mod common;

use common::write_file;
use morte_core::errors::ExErrorKind;
use morte_core::locate::{resolve_all, resolve_unique};
use tempfile::TempDir;

#[test]
fn test_unique_scheduler_log_is_found() {
    // Given: one scheduler log next to unrelated files
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "test.o12345", b"log");
    write_file(dir.path(), "test.e12345", b"err");
    write_file(dir.path(), "foo/file1", b"data");

    // When
    let path = resolve_unique(dir.path(), "test.o*").unwrap();

    // Then
    assert_eq!(path, dir.path().join("test.o12345"));
}

#[test]
fn test_two_matches_are_ambiguous_with_candidates() {
    // Given: two runs left logs behind
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "test.o2", b"b");
    write_file(dir.path(), "test.o1", b"a");

    // When
    let err = resolve_unique(dir.path(), "test.o*").unwrap_err();

    // Then: both candidates are listed, sorted
    assert_eq!(err.kind(), ExErrorKind::AmbiguousSource);
    let candidates = err.candidates().unwrap();
    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].ends_with("test.o1"));
    assert!(candidates[1].ends_with("test.o2"));
}

#[test]
fn test_no_match_is_unavailable() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "other.txt", b"x");

    let err = resolve_unique(dir.path(), "test.o*").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::FileUnavailable);
}

#[test]
fn test_wildcards_in_directory_components() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "run1/archive/output000/ocean.nc", b"1");
    write_file(dir.path(), "run1/archive/output001/ocean.nc", b"2");
    write_file(dir.path(), "run1/archive/restart000/ocean.nc", b"3");

    let all = resolve_all(dir.path(), "run1/archive/output*/ocean.nc").unwrap();

    assert_eq!(all.len(), 2);
    assert!(all[0].ends_with("output000/ocean.nc"));
}

#[test]
fn test_directories_do_not_satisfy_the_last_component() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("test.odir")).unwrap();
    write_file(dir.path(), "test.o99", b"log");

    let path = resolve_unique(dir.path(), "test.o*").unwrap();

    assert!(path.ends_with("test.o99"));
}

#[test]
fn test_literal_pattern_resolves_without_listing() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "foo/file1", b"x");

    let path = resolve_unique(dir.path(), "./foo/file1").unwrap();

    assert_eq!(path, dir.path().join("foo").join("file1"));
}
