//! Error types for devstore
//!
//! Provides a unified error type for all operations.
//!
//! The taxonomy is deliberately two-level: `NotFound` (a lookup failed) and
//! everything else (a generic backend/adapter failure). Callers that only
//! care about the distinction can use [`StoreError::is_not_found`].

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for devstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("file not found: {name}")]
    NotFound { name: String },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("unknown storage area: {0}")]
    UnknownArea(String),

    #[error("content of {0} is not valid UTF-8 text")]
    NotText(String),

    // -------------------------------------------------------------------------
    // Capacity Errors
    // -------------------------------------------------------------------------
    #[error("capacity exceeded: need {needed} bytes, {free} free")]
    CapacityExceeded { needed: u64, free: u64 },

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("backend error: {0}")]
    Backend(String),

    // -------------------------------------------------------------------------
    // Adapter Errors
    // -------------------------------------------------------------------------
    #[error("storage worker disconnected")]
    Disconnected,
}

impl StoreError {
    /// True if this is the lookup-failed class of error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Build a `NotFound` for the given entry name.
    pub fn not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound { name: name.into() }
    }
}
