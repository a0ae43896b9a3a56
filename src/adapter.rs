//! Device Storage Adapter
//!
//! The public face of the crate: eight operations over a named storage
//! area, each returning a [`StorageRequest`] that resolves exactly once.
//!
//! ## Concurrency Model
//!
//! One worker thread per adapter owns the backend. Operations are queued as
//! jobs and executed strictly in submission order, so the
//! save-with-overwrite sequence (lookup, delete, rewrite) needs no
//! cross-operation coordination: it runs as one job. Control returns to the
//! caller immediately on submission; suspension happens only at the request
//! handle.
//!
//! No operation is cancellable and the adapter enforces no timeouts;
//! [`StorageRequest::wait_timeout`] bounds the caller's wait only.

use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::backend::StorageBackend;
use crate::blob::{Blob, FileEntry, SpaceKind};
use crate::config::{Config, StorageArea};
use crate::error::{Result, StoreError};
use crate::pattern::NamePattern;
use crate::request::{Completion, StorageRequest};

// =============================================================================
// Overwrite Policy
// =============================================================================

/// What to do when a save hits an existing entry
pub enum Overwrite {
    /// Delete the existing entry, then write
    Always,

    /// Leave the existing entry untouched; the save resolves
    /// [`SaveOutcome::SkippedExisting`]
    Never,

    /// Ask the predicate, which sees the conflicting entry. Only invoked
    /// when a conflict exists.
    DecideWith(Box<dyn FnOnce(&FileEntry) -> bool + Send>),
}

impl Overwrite {
    fn decide(self, existing: &FileEntry) -> bool {
        match self {
            Overwrite::Always => true,
            Overwrite::Never => false,
            Overwrite::DecideWith(predicate) => predicate(existing),
        }
    }
}

impl From<bool> for Overwrite {
    fn from(flag: bool) -> Self {
        if flag {
            Overwrite::Always
        } else {
            Overwrite::Never
        }
    }
}

impl fmt::Debug for Overwrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overwrite::Always => f.write_str("Always"),
            Overwrite::Never => f.write_str("Never"),
            Overwrite::DecideWith(_) => f.write_str("DecideWith(..)"),
        }
    }
}

/// How a save resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The blob was written (fresh name, or the conflict was overwritten)
    Written,

    /// An entry already existed and the overwrite choice declined;
    /// stored content is untouched
    SkippedExisting,
}

// =============================================================================
// Jobs
// =============================================================================

/// One queued operation, paired with its completion
enum Job {
    Exists {
        name: String,
        done: Completion<Option<FileEntry>>,
    },
    SaveBlob {
        blob: Blob,
        name: String,
        overwrite: Overwrite,
        done: Completion<SaveOutcome>,
    },
    Open {
        name: String,
        done: Completion<FileEntry>,
    },
    ReadAsText {
        name: String,
        done: Completion<String>,
    },
    Delete {
        name: String,
        done: Completion<()>,
    },
    List {
        path: String,
        pattern: NamePattern,
        done: Completion<Vec<FileEntry>>,
    },
    Space {
        kind: SpaceKind,
        done: Completion<u64>,
    },
    Shutdown,
}

// =============================================================================
// Adapter
// =============================================================================

/// Adapter over one named storage area
///
/// Holds no mutable state of its own; the backend lives on the worker
/// thread for the adapter's lifetime.
pub struct DeviceStorage {
    area: StorageArea,
    jobs: Sender<Job>,
    worker: Option<JoinHandle<()>>,
}

impl DeviceStorage {
    /// Wrap an explicit backend (used with [`MemBackend`] in tests)
    ///
    /// [`MemBackend`]: crate::backend::MemBackend
    pub fn new(backend: impl StorageBackend + 'static, area: StorageArea) -> Self {
        let (tx, rx) = unbounded();

        let worker = thread::Builder::new()
            .name("devstore-worker".to_string())
            .spawn(move || worker_loop(backend, rx))
            .expect("failed to spawn storage worker");

        Self {
            area,
            jobs: tx,
            worker: Some(worker),
        }
    }

    /// Open a filesystem-backed adapter from config
    pub fn open(config: Config) -> Result<Self> {
        let area = config.area;
        let backend = crate::backend::FsBackend::open(&config)?;
        Ok(Self::new(backend, area))
    }

    /// Which storage area this adapter serves
    pub fn area(&self) -> StorageArea {
        self.area
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Check whether `name` exists. Resolves `Some(entry)` if present,
    /// `None` if absent; absence is not an error here. No side effects.
    pub fn exists(&self, name: impl Into<String>) -> StorageRequest<Option<FileEntry>> {
        self.submit(|done| Job::Exists {
            name: name.into(),
            done,
        })
    }

    /// Save a blob under `name`, consulting `overwrite` on conflict.
    ///
    /// Algorithm: look up `name`; if absent, write directly; if present and
    /// the overwrite choice decides true, delete then write; otherwise
    /// resolve [`SaveOutcome::SkippedExisting`] without touching storage.
    pub fn save_blob(
        &self,
        blob: Blob,
        name: impl Into<String>,
        overwrite: impl Into<Overwrite>,
    ) -> StorageRequest<SaveOutcome> {
        self.submit(|done| Job::SaveBlob {
            blob,
            name: name.into(),
            overwrite: overwrite.into(),
            done,
        })
    }

    /// Save textual content as a `text/plain` blob (delegates to
    /// [`save_blob`](Self::save_blob))
    pub fn save(
        &self,
        content: impl Into<String>,
        name: impl Into<String>,
        overwrite: impl Into<Overwrite>,
    ) -> StorageRequest<SaveOutcome> {
        self.save_blob(Blob::text(content), name, overwrite)
    }

    /// Fetch the entry named `name`. Resolves `NotFound` if absent.
    pub fn open_file(&self, name: impl Into<String>) -> StorageRequest<FileEntry> {
        self.submit(|done| Job::Open {
            name: name.into(),
            done,
        })
    }

    /// Fetch `name` and decode its content as UTF-8 text
    pub fn read_as_text(&self, name: impl Into<String>) -> StorageRequest<String> {
        self.submit(|done| Job::ReadAsText {
            name: name.into(),
            done,
        })
    }

    /// Delete the entry named `name`. Resolves `NotFound` if absent.
    pub fn delete(&self, name: impl Into<String>) -> StorageRequest<()> {
        self.submit(|done| Job::Delete {
            name: name.into(),
            done,
        })
    }

    /// List entries under `path` (default root: `""`) whose names match
    /// `pattern`, in the backend's enumeration order.
    ///
    /// `path` must not begin with a separator. Resolves exactly once, with
    /// an empty vec when nothing matches.
    pub fn list(
        &self,
        path: impl Into<String>,
        pattern: impl Into<NamePattern>,
    ) -> StorageRequest<Vec<FileEntry>> {
        self.submit(|done| Job::List {
            path: path.into(),
            pattern: pattern.into(),
            done,
        })
    }

    /// Query free or used space (in bytes)
    pub fn space(&self, kind: SpaceKind) -> StorageRequest<u64> {
        self.submit(|done| Job::Space { kind, done })
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Shut down: complete all queued jobs, then join the worker
    pub fn close(mut self) -> Result<()> {
        self.shutdown_worker()
    }

    fn shutdown_worker(&mut self) -> Result<()> {
        // Queued jobs drain first; Shutdown is just the last job in line
        let _ = self.jobs.send(Job::Shutdown);

        if let Some(handle) = self.worker.take() {
            handle
                .join()
                .map_err(|_| StoreError::Backend("storage worker panicked".to_string()))?;
        }
        Ok(())
    }

    /// Build a request, hand its completion to the worker
    fn submit<T>(&self, make_job: impl FnOnce(Completion<T>) -> Job) -> StorageRequest<T> {
        let (done, request) = StorageRequest::pair();
        match self.jobs.send(make_job(done)) {
            Ok(()) => request,
            // Worker gone; the job (and its completion) died with the send
            Err(_) => StorageRequest::resolved(Err(StoreError::Disconnected)),
        }
    }
}

impl Drop for DeviceStorage {
    fn drop(&mut self) {
        let _ = self.shutdown_worker();
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Runs on the worker thread; owns the backend
fn worker_loop(mut backend: impl StorageBackend, jobs: Receiver<Job>) {
    tracing::debug!("storage worker started");

    while let Ok(job) = jobs.recv() {
        match job {
            Job::Exists { name, done } => {
                done.resolve(traced("exists", &name, backend.lookup(&name)));
            }
            Job::SaveBlob {
                blob,
                name,
                overwrite,
                done,
            } => {
                done.resolve(traced(
                    "save_blob",
                    &name,
                    run_save_blob(&mut backend, blob, &name, overwrite),
                ));
            }
            Job::Open { name, done } => {
                done.resolve(traced("open", &name, run_open(&backend, &name)));
            }
            Job::ReadAsText { name, done } => {
                done.resolve(traced(
                    "read_as_text",
                    &name,
                    run_read_as_text(&backend, &name),
                ));
            }
            Job::Delete { name, done } => {
                done.resolve(traced("delete", &name, backend.delete(&name)));
            }
            Job::List {
                path,
                pattern,
                done,
            } => {
                done.resolve(traced("list", &path, run_list(&backend, &path, &pattern)));
            }
            Job::Space { kind, done } => {
                done.resolve(traced("space", "", backend.query_space(kind)));
            }
            Job::Shutdown => break,
        }
    }

    tracing::debug!("storage worker stopped");
}

/// Log the outcome, pass it through unchanged
fn traced<T>(op: &str, name: &str, outcome: Result<T>) -> Result<T> {
    match &outcome {
        Ok(_) => tracing::debug!(op, name, "ok"),
        Err(e) => tracing::warn!(op, name, error = %e, "failed"),
    }
    outcome
}

fn run_save_blob(
    backend: &mut impl StorageBackend,
    blob: Blob,
    name: &str,
    overwrite: Overwrite,
) -> Result<SaveOutcome> {
    match backend.lookup(name)? {
        // Fresh name: write directly
        None => {
            backend.write(name, &blob)?;
            Ok(SaveOutcome::Written)
        }
        Some(existing) => {
            if overwrite.decide(&existing) {
                // Delete must complete before the rewrite begins
                backend.delete(name)?;
                backend.write(name, &blob)?;
                Ok(SaveOutcome::Written)
            } else {
                Ok(SaveOutcome::SkippedExisting)
            }
        }
    }
}

fn run_open(backend: &impl StorageBackend, name: &str) -> Result<FileEntry> {
    backend
        .lookup(name)?
        .ok_or_else(|| StoreError::not_found(name))
}

fn run_read_as_text(backend: &impl StorageBackend, name: &str) -> Result<String> {
    let entry = run_open(backend, name)?;
    String::from_utf8(entry.blob().data().to_vec())
        .map_err(|_| StoreError::NotText(name.to_string()))
}

fn run_list(
    backend: &impl StorageBackend,
    path: &str,
    pattern: &NamePattern,
) -> Result<Vec<FileEntry>> {
    let mut cursor = backend.enumerate(path)?;

    // Accumulate matches as the cursor advances one entry at a time
    let mut matches = Vec::new();
    while let Some(entry) = cursor.advance()? {
        if pattern.matches(entry.name()) {
            matches.push(entry);
        }
    }
    Ok(matches)
}
