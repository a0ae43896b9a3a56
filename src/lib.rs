//! # devstore
//!
//! A device-storage adapter exposing named storage areas ("sdcard",
//! "music", ...) through channel-based asynchronous operations:
//! - Existence checks, blob/text save, open, read-as-text, delete
//! - Directory listing with substring or regex name patterns
//! - Free/used space queries against a modeled capacity
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Caller(s)                              │
//! │        exists / save / open / read / delete / list / space   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Job queue (FIFO)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Worker Thread                              │
//! │         (owns the backend, one job at a time)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  FsBackend  │          │  MemBackend │
//!   │ (area dirs) │          │ (test fake) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! Every operation returns a [`StorageRequest`] immediately; the outcome
//! (one success-or-failure result, never a callback pair) arrives over the
//! request's completion channel.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod blob;
pub mod pattern;
pub mod request;
pub mod backend;
pub mod adapter;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, StorageArea};
pub use blob::{Blob, FileEntry, SpaceKind};
pub use pattern::NamePattern;
pub use request::StorageRequest;
pub use backend::{EntryCursor, FsBackend, MemBackend, StorageBackend};
pub use adapter::{DeviceStorage, Overwrite, SaveOutcome};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of devstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
