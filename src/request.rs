//! Storage request handles
//!
//! Every adapter operation returns a [`StorageRequest`] immediately and runs
//! on the worker thread. The request carries exactly one success-or-failure
//! outcome back to the caller over a one-shot channel; there is no separate
//! success/error callback pair.

use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::error::{Result, StoreError};

/// Pending outcome of a storage operation
///
/// Resolves exactly once. Dropping the request abandons the outcome; the
/// operation itself still runs.
#[derive(Debug)]
pub struct StorageRequest<T> {
    rx: Receiver<Result<T>>,
}

/// Completion side of a request, held by the worker
#[derive(Debug)]
pub(crate) struct Completion<T> {
    tx: Sender<Result<T>>,
}

impl<T> Completion<T> {
    /// Resolve the paired request. The caller may have dropped its handle;
    /// that is not an error.
    pub(crate) fn resolve(self, outcome: Result<T>) {
        let _ = self.tx.send(outcome);
    }
}

impl<T> StorageRequest<T> {
    /// Create a request and its completion side
    pub(crate) fn pair() -> (Completion<T>, StorageRequest<T>) {
        let (tx, rx) = bounded(1);
        (Completion { tx }, StorageRequest { rx })
    }

    /// Create an already-resolved request (used when the worker is gone
    /// before the job can be submitted)
    pub(crate) fn resolved(outcome: Result<T>) -> StorageRequest<T> {
        let (completion, request) = Self::pair();
        completion.resolve(outcome);
        request
    }

    /// Block until the operation completes
    pub fn wait(self) -> Result<T> {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            // Completion dropped without resolving: worker shut down mid-job
            Err(_) => Err(StoreError::Disconnected),
        }
    }

    /// Non-blocking poll: `None` while the operation is still in flight
    pub fn try_wait(&self) -> Option<Result<T>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(StoreError::Disconnected)),
        }
    }

    /// Block up to `timeout`: `None` if the operation has not completed yet
    ///
    /// This bounds the caller's wait only; the operation is not cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<T>> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(StoreError::Disconnected)),
        }
    }
}
