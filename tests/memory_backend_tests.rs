//! Tests for MemBackend
//!
//! These tests verify the backend contract directly:
//! - Name/path validation
//! - Write-on-existing rejection
//! - Cursor enumeration order and exhaustion
//! - Space accounting and capacity limits
//! - Shared state across cloned handles

use devstore::{Blob, MemBackend, SpaceKind, StorageBackend, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn backend_with(entries: &[(&str, &str)]) -> MemBackend {
    let mut backend = MemBackend::new();
    for (name, content) in entries {
        backend.write(name, &Blob::text(*content)).unwrap();
    }
    backend
}

fn cursor_names(backend: &MemBackend, path: &str) -> Vec<String> {
    let mut cursor = backend.enumerate(path).unwrap();
    let mut names = Vec::new();
    while let Some(entry) = cursor.advance().unwrap() {
        names.push(entry.name().to_string());
    }
    names
}

// =============================================================================
// Lookup/Write/Delete Tests
// =============================================================================

#[test]
fn test_lookup_missing_is_none() {
    let backend = MemBackend::new();

    assert!(backend.lookup("nope.txt").unwrap().is_none());
}

#[test]
fn test_write_then_lookup() {
    let backend = backend_with(&[("a.txt", "hello")]);

    let entry = backend.lookup("a.txt").unwrap().expect("should exist");

    assert_eq!(entry.name(), "a.txt");
    assert_eq!(entry.blob().data().as_ref(), b"hello");
}

#[test]
fn test_write_existing_name_fails() {
    let mut backend = backend_with(&[("a.txt", "hello")]);

    let err = backend.write("a.txt", &Blob::text("again")).unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
    // Original content untouched
    let entry = backend.lookup("a.txt").unwrap().unwrap();
    assert_eq!(entry.blob().data().as_ref(), b"hello");
}

#[test]
fn test_delete_removes_entry() {
    let mut backend = backend_with(&[("a.txt", "hello")]);

    backend.delete("a.txt").unwrap();

    assert!(backend.lookup("a.txt").unwrap().is_none());
    assert_eq!(backend.entry_count(), 0);
}

#[test]
fn test_delete_missing_is_not_found() {
    let mut backend = MemBackend::new();

    let err = backend.delete("nope.txt").unwrap_err();

    assert!(err.is_not_found());
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_rejects_empty_name() {
    let backend = MemBackend::new();

    let err = backend.lookup("").unwrap_err();

    assert!(matches!(err, StoreError::InvalidPath(_)));
}

#[test]
fn test_rejects_leading_separator() {
    let mut backend = MemBackend::new();

    let err = backend.write("/a.txt", &Blob::text("x")).unwrap_err();

    assert!(matches!(err, StoreError::InvalidPath(_)));
}

#[test]
fn test_rejects_dot_dot_components() {
    let mut backend = MemBackend::new();

    for bad in ["../a.txt", "photos/../a.txt", "photos/./a.txt", "a//b.txt"] {
        let err = backend.write(bad, &Blob::text("x")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath(_)), "accepted {bad}");
    }
}

#[test]
fn test_enumerate_rejects_leading_separator() {
    let backend = MemBackend::new();

    let err = backend.enumerate("/photos").unwrap_err();

    assert!(matches!(err, StoreError::InvalidPath(_)));
}

#[test]
fn test_enumerate_root_is_empty_string() {
    let backend = backend_with(&[("a.txt", "x")]);

    assert_eq!(cursor_names(&backend, ""), vec!["a.txt"]);
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_enumeration_is_sorted_by_name() {
    let backend = backend_with(&[("c.txt", "3"), ("a.txt", "1"), ("b.txt", "2")]);

    assert_eq!(cursor_names(&backend, ""), vec!["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_enumeration_under_path() {
    let backend = backend_with(&[
        ("photos/cat.jpg", "1"),
        ("photos/dog.jpg", "2"),
        ("photosbackup/old.jpg", "3"),
        ("song.mp3", "4"),
    ]);

    assert_eq!(
        cursor_names(&backend, "photos"),
        vec!["photos/cat.jpg", "photos/dog.jpg"]
    );
}

#[test]
fn test_exhausted_cursor_stays_exhausted() {
    let backend = backend_with(&[("a.txt", "x")]);

    let mut cursor = backend.enumerate("").unwrap();
    assert!(cursor.advance().unwrap().is_some());
    assert!(cursor.advance().unwrap().is_none());
    assert!(cursor.advance().unwrap().is_none());
}

#[test]
fn test_cursor_is_a_snapshot() {
    let mut backend = backend_with(&[("a.txt", "1"), ("b.txt", "2")]);

    let mut cursor = backend.enumerate("").unwrap();
    backend.delete("b.txt").unwrap();

    // The walk still sees the state at enumerate time
    assert_eq!(cursor.advance().unwrap().unwrap().name(), "a.txt");
    assert_eq!(cursor.advance().unwrap().unwrap().name(), "b.txt");
    assert!(cursor.advance().unwrap().is_none());
}

// =============================================================================
// Space Tests
// =============================================================================

#[test]
fn test_space_used_and_free() {
    let mut backend = MemBackend::with_capacity(100);
    backend.write("a.txt", &Blob::text("1234567890")).unwrap(); // 10 bytes

    assert_eq!(backend.query_space(SpaceKind::Used).unwrap(), 10);
    assert_eq!(backend.query_space(SpaceKind::Free).unwrap(), 90);
}

#[test]
fn test_write_beyond_capacity_fails() {
    let mut backend = MemBackend::with_capacity(4);

    let err = backend.write("a.txt", &Blob::text("12345")).unwrap_err();

    assert!(matches!(
        err,
        StoreError::CapacityExceeded { needed: 5, free: 4 }
    ));
    assert_eq!(backend.entry_count(), 0);
}

// =============================================================================
// Shared Handle Tests
// =============================================================================

#[test]
fn test_clones_share_state() {
    let mut backend = MemBackend::new();
    let observer = backend.clone();

    backend.write("a.txt", &Blob::text("hello")).unwrap();

    assert_eq!(observer.entry_count(), 1);
    assert!(observer.lookup("a.txt").unwrap().is_some());
}
