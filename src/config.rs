//! Configuration for devstore
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::StoreError;

/// Main configuration for a devstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all storage areas
    /// Internal structure:
    ///   {root_dir}/
    ///     ├── sdcard/      (default area)
    ///     ├── music/
    ///     └── ...          (one subdirectory per area, created on demand)
    pub root_dir: PathBuf,

    /// Which named storage area to open
    pub area: StorageArea,

    // -------------------------------------------------------------------------
    // Space Accounting
    // -------------------------------------------------------------------------
    /// Total capacity modeled for the area (in bytes)
    ///
    /// Used by space queries: free = capacity - used. Writes that would
    /// exceed it fail with `CapacityExceeded`.
    pub capacity_bytes: u64,
}

/// The fixed set of host-defined storage areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageArea {
    #[default]
    Sdcard,
    Music,
    Pictures,
    Videos,
    Apps,
}

impl StorageArea {
    /// The area's canonical name (also its directory name on disk)
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Sdcard => "sdcard",
            StorageArea::Music => "music",
            StorageArea::Pictures => "pictures",
            StorageArea::Videos => "videos",
            StorageArea::Apps => "apps",
        }
    }
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageArea {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sdcard" => Ok(StorageArea::Sdcard),
            "music" => Ok(StorageArea::Music),
            "pictures" => Ok(StorageArea::Pictures),
            "videos" => Ok(StorageArea::Videos),
            "apps" => Ok(StorageArea::Apps),
            other => Err(StoreError::UnknownArea(other.to_string())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./devstore_data"),
            area: StorageArea::Sdcard,
            capacity_bytes: 256 * 1024 * 1024, // 256 MiB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory (holds one subdirectory per area)
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the storage area to open
    pub fn area(mut self, area: StorageArea) -> Self {
        self.config.area = area;
        self
    }

    /// Set the modeled capacity (in bytes)
    pub fn capacity_bytes(mut self, bytes: u64) -> Self {
        self.config.capacity_bytes = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
