//! In-memory backend
//!
//! BTreeMap-based fake with the same contract as the filesystem backend.
//! Handles are cheap clones sharing one map, so a test can keep a handle,
//! hand another to the adapter, and seed or inspect state directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::blob::{Blob, FileEntry, SpaceKind};
use crate::error::{Result, StoreError};

use super::{under_path, validate_list_path, validate_name, EntryCursor, StorageBackend};

/// Default modeled capacity for a fresh in-memory area (64 MiB)
const DEFAULT_CAPACITY: u64 = 64 * 1024 * 1024;

/// In-memory storage area
///
/// Enumeration order is the map's iteration order (sorted by name).
#[derive(Clone)]
pub struct MemBackend {
    entries: Arc<RwLock<BTreeMap<String, Blob>>>,
    capacity_bytes: u64,
}

impl MemBackend {
    /// Create an empty area with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty area with an explicit capacity (in bytes)
    pub fn with_capacity(capacity_bytes: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            capacity_bytes,
        }
    }

    /// Number of stored entries
    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }

    fn used_bytes(&self) -> u64 {
        self.entries.read().values().map(|blob| blob.len()).sum()
    }
}

impl Default for MemBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemBackend {
    fn lookup(&self, name: &str) -> Result<Option<FileEntry>> {
        let name = validate_name(name)?;
        let entries = self.entries.read();
        Ok(entries
            .get(name)
            .map(|blob| FileEntry::new(name, blob.clone())))
    }

    fn write(&mut self, name: &str, blob: &Blob) -> Result<()> {
        let name = validate_name(name)?;

        let mut entries = self.entries.write();
        if entries.contains_key(name) {
            return Err(StoreError::Backend(format!("{name} already exists")));
        }

        let used: u64 = entries.values().map(|b| b.len()).sum();
        let free = self.capacity_bytes.saturating_sub(used);
        if blob.len() > free {
            return Err(StoreError::CapacityExceeded {
                needed: blob.len(),
                free,
            });
        }

        entries.insert(name.to_string(), blob.clone());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        let mut entries = self.entries.write();
        match entries.remove(name) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(name)),
        }
    }

    fn enumerate(&self, path: &str) -> Result<Box<dyn EntryCursor>> {
        let path = validate_list_path(path)?;

        // Snapshot the matching entries; blob payloads are shared, not copied
        let entries = self.entries.read();
        let snapshot: Vec<FileEntry> = entries
            .iter()
            .filter(|(name, _)| under_path(name, path))
            .map(|(name, blob)| FileEntry::new(name.clone(), blob.clone()))
            .collect();

        Ok(Box::new(MemCursor {
            entries: snapshot,
            pos: 0,
        }))
    }

    fn query_space(&self, kind: SpaceKind) -> Result<u64> {
        let used = self.used_bytes();
        match kind {
            SpaceKind::Used => Ok(used),
            SpaceKind::Free => Ok(self.capacity_bytes.saturating_sub(used)),
        }
    }
}

/// Cursor over a snapshot of the map
#[derive(Debug)]
struct MemCursor {
    entries: Vec<FileEntry>,
    pos: usize,
}

impl EntryCursor for MemCursor {
    fn advance(&mut self) -> Result<Option<FileEntry>> {
        let entry = self.entries.get(self.pos).cloned();
        if entry.is_some() {
            self.pos += 1;
        }
        Ok(entry)
    }
}
