//! Backend Module
//!
//! Abstracts the host storage capability behind a small trait so the adapter
//! can run against a real filesystem or an in-memory fake.
//!
//! ## Responsibilities
//! - Point lookup, write, delete of named blobs
//! - Cursor-style enumeration under a path prefix
//! - Free/used space queries against a modeled capacity
//!
//! ## Name Rules
//! Entry names are `/`-separated relative paths. Backends reject names that
//! are empty, begin with `/`, or contain empty, `.`, or `..` components.
//! Enumeration paths follow the same rules except that the empty string
//! (the area root) is allowed.

mod fs;
mod memory;

pub use fs::FsBackend;
pub use memory::MemBackend;

use crate::blob::{Blob, FileEntry, SpaceKind};
use crate::error::{Result, StoreError};

/// Incremental enumeration over stored entries
///
/// Yields one entry per call, in the backend's enumeration order
/// (sorted by name for both built-in backends). `None` ends the walk.
pub trait EntryCursor: std::fmt::Debug {
    fn advance(&mut self) -> Result<Option<FileEntry>>;
}

/// The host storage capability
///
/// One instance represents one named storage area. All methods are
/// synchronous; the adapter supplies the asynchrony by running them on its
/// worker thread.
pub trait StorageBackend: Send {
    /// Look up an entry by name. `Ok(None)` means not present.
    fn lookup(&self, name: &str) -> Result<Option<FileEntry>>;

    /// Store a blob under `name`, replacing nothing (callers delete first
    /// when overwriting). Fails with `CapacityExceeded` if the payload does
    /// not fit.
    fn write(&mut self, name: &str, blob: &Blob) -> Result<()>;

    /// Remove the entry named `name`. Fails with `NotFound` if absent.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Start a cursor over entries whose name lies under `path`
    /// ("" = the whole area).
    fn enumerate(&self, path: &str) -> Result<Box<dyn EntryCursor>>;

    /// Free or used byte count for the area
    fn query_space(&self, kind: SpaceKind) -> Result<u64>;
}

/// Validate an entry name; returns the name on success.
///
/// Shared by both backends so the adapter sees identical validation
/// behavior regardless of what it runs against.
pub(crate) fn validate_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(StoreError::InvalidPath("empty name".to_string()));
    }
    validate_components(name)?;
    Ok(name)
}

/// Validate an enumeration path; "" (the root) is allowed.
pub(crate) fn validate_list_path(path: &str) -> Result<&str> {
    if path.is_empty() {
        return Ok(path);
    }
    validate_components(path)?;
    Ok(path)
}

fn validate_components(path: &str) -> Result<()> {
    if path.starts_with('/') {
        return Err(StoreError::InvalidPath(format!(
            "must not begin with a separator: {path}"
        )));
    }
    for component in path.split('/') {
        if component.is_empty() || component == "." || component == ".." {
            return Err(StoreError::InvalidPath(format!(
                "bad component {component:?} in {path}"
            )));
        }
    }
    Ok(())
}

/// Does `name` fall under the enumeration path `path`?
///
/// "" matches everything; otherwise `path` must be a whole-component prefix
/// ("pho" does not cover "photos/cat.jpg", "photos" does).
pub(crate) fn under_path(name: &str, path: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    match name.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
