//! Ledger store trait definition.

use crate::error::StorageResult;
use crate::record::{FormRecord, StoredRecord};

/// The persisted store behind a route card ledger.
///
/// Stores are append-only: records are inserted once and never updated or
/// deleted. Cluster numbers are compared as plain text; stores do not parse
/// them.
///
/// # Invariants
///
/// - `insert` fails with [`crate::StorageError::Duplicate`] when the cluster
///   number is already stored, and writes nothing in that case
/// - `insert` assigns `id` and `created_at`; callers never supply them
/// - `max_with_prefix` and `list_with_prefix` match prefixes exactly
///   (no wildcard interpretation)
///
/// # Implementors
///
/// - [`super::SqliteStore`] - For persistent storage
/// - [`super::InMemoryStore`] - For testing
pub trait LedgerStore: Send {
    /// Inserts a record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Duplicate`] if the cluster number is
    /// already present, or a backend error if the write fails.
    fn insert(&mut self, record: &FormRecord) -> StorageResult<StoredRecord>;

    /// Looks up a record by its exact cluster number.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, cluster_number: &str) -> StorageResult<Option<StoredRecord>>;

    /// Returns the greatest stored cluster number starting with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn max_with_prefix(&self, prefix: &str) -> StorageResult<Option<String>>;

    /// Returns every record whose cluster number starts with `prefix`,
    /// ascending by cluster number.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_with_prefix(&self, prefix: &str) -> StorageResult<Vec<StoredRecord>>;

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count(&self) -> StorageResult<u64>;
}
