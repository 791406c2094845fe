//! The record store abstraction and an in-memory snapshot implementation.

use std::sync::{Arc, RwLock};

use crate::Error;

use super::{RecordFilter, TransactionRecord};

/// Holds the transaction records that every read view is computed from.
///
/// Implementations must make [TransactionStore::replace_all] atomic from the
/// point of view of readers: a concurrent [TransactionStore::find] sees either
/// the old records or the new records, never a mix.
pub trait TransactionStore: Send + Sync {
    /// Replace every stored record with `records`.
    ///
    /// No merging or de-duplication by ID is performed.
    ///
    /// # Errors
    /// Returns an error if the underlying storage fails, in which case the
    /// previous records are kept.
    fn replace_all(&self, records: Vec<TransactionRecord>) -> Result<(), Error>;

    /// Get the records matching `filter`, in insertion order.
    ///
    /// # Errors
    /// Returns an error if the underlying storage fails.
    fn find(&self, filter: &RecordFilter) -> Result<Vec<TransactionRecord>, Error>;
}

/// A [TransactionStore] that keeps records in memory.
///
/// Each ingest swaps in a new immutable snapshot; readers clone the current
/// snapshot and filter it without holding the lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Arc<Vec<TransactionRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn current_snapshot(&self) -> Result<Arc<Vec<TransactionRecord>>, Error> {
        self.snapshot
            .read()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map(|snapshot| Arc::clone(&snapshot))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for MemoryStore {
    fn replace_all(&self, records: Vec<TransactionRecord>) -> Result<(), Error> {
        let next = Arc::new(records);

        let mut snapshot = self
            .snapshot
            .write()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;
        *snapshot = next;

        Ok(())
    }

    fn find(&self, filter: &RecordFilter) -> Result<Vec<TransactionRecord>, Error> {
        let snapshot = self.current_snapshot()?;

        Ok(snapshot
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
