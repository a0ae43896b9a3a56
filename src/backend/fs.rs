//! Filesystem backend
//!
//! Stores one directory per storage area under a configured root. Entry
//! names map straight to relative paths; nested names get their parent
//! directories created on demand.
//!
//! Content types are not persisted; they are derived from the file
//! extension on read. Space figures come from a modeled capacity, not the
//! host disk: used = sum of stored file sizes, free = capacity - used.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::blob::{Blob, FileEntry, SpaceKind, OCTET_STREAM, TEXT_CONTENT_TYPE};
use crate::config::Config;
use crate::error::{Result, StoreError};

use super::{under_path, validate_list_path, validate_name, EntryCursor, StorageBackend};

/// Filesystem-backed storage area
pub struct FsBackend {
    /// Directory holding this area's entries
    area_dir: PathBuf,

    /// Modeled capacity for space accounting
    capacity_bytes: u64,
}

impl FsBackend {
    /// Open or create the configured area directory
    pub fn open(config: &Config) -> Result<Self> {
        let area_dir = config.root_dir.join(config.area.as_str());
        fs::create_dir_all(&area_dir)?;

        Ok(Self {
            area_dir,
            capacity_bytes: config.capacity_bytes,
        })
    }

    /// The directory holding this area's entries
    pub fn area_dir(&self) -> &Path {
        &self.area_dir
    }

    /// Map an entry name to its on-disk path (name must be pre-validated)
    fn entry_path(&self, name: &str) -> PathBuf {
        self.area_dir.join(name)
    }

    /// Sum of stored file sizes
    fn used_bytes(&self) -> Result<u64> {
        let mut used = 0;
        for name in self.collect_names()? {
            used += fs::metadata(self.entry_path(&name))?.len();
        }
        Ok(used)
    }

    /// All entry names in the area, sorted
    fn collect_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        collect_into(&self.area_dir, "", &mut names)?;
        names.sort();
        Ok(names)
    }
}

impl StorageBackend for FsBackend {
    fn lookup(&self, name: &str) -> Result<Option<FileEntry>> {
        let name = validate_name(name)?;

        if !self.entry_path(name).is_file() {
            return Ok(None);
        }
        read_entry(&self.area_dir, name).map(Some)
    }

    fn write(&mut self, name: &str, blob: &Blob) -> Result<()> {
        let name = validate_name(name)?;

        let path = self.entry_path(name);
        if path.exists() {
            return Err(StoreError::Backend(format!("{name} already exists")));
        }

        let free = self.capacity_bytes.saturating_sub(self.used_bytes()?);
        if blob.len() > free {
            return Err(StoreError::CapacityExceeded {
                needed: blob.len(),
                free,
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, blob.data())?;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let name = validate_name(name)?;

        let path = self.entry_path(name);
        if !path.is_file() {
            return Err(StoreError::not_found(name));
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    fn enumerate(&self, path: &str) -> Result<Box<dyn EntryCursor>> {
        let path = validate_list_path(path)?;

        // Walk names eagerly, read contents lazily as the cursor advances
        let names: Vec<String> = self
            .collect_names()?
            .into_iter()
            .filter(|name| under_path(name, path))
            .collect();

        Ok(Box::new(FsCursor {
            area_dir: self.area_dir.clone(),
            names,
            pos: 0,
        }))
    }

    fn query_space(&self, kind: SpaceKind) -> Result<u64> {
        let used = self.used_bytes()?;
        match kind {
            SpaceKind::Used => Ok(used),
            SpaceKind::Free => Ok(self.capacity_bytes.saturating_sub(used)),
        }
    }
}

/// Cursor over a name snapshot; file contents are read per advance
#[derive(Debug)]
struct FsCursor {
    area_dir: PathBuf,
    names: Vec<String>,
    pos: usize,
}

impl EntryCursor for FsCursor {
    fn advance(&mut self) -> Result<Option<FileEntry>> {
        let Some(name) = self.names.get(self.pos) else {
            return Ok(None);
        };
        self.pos += 1;

        read_entry(&self.area_dir, name).map(Some)
    }
}

/// Read one entry off disk
fn read_entry(area_dir: &Path, name: &str) -> Result<FileEntry> {
    let data = fs::read(area_dir.join(name))?;
    let blob = Blob::new(Bytes::from(data), content_type_for(name));
    Ok(FileEntry::new(name, blob))
}

/// Recursively collect entry names relative to the area root
fn collect_into(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();

        let name = if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{prefix}/{file_name}")
        };

        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, &name, out)?;
        } else if path.is_file() {
            out.push(name);
        }
    }
    Ok(())
}

/// Derive a content type from the entry name's extension
fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("");
    match ext {
        "txt" | "log" | "text" => TEXT_CONTENT_TYPE,
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}
