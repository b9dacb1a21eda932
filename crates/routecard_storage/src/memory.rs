//! In-memory ledger store for testing.

use crate::backend::LedgerStore;
use crate::error::{StorageError, StorageResult};
use crate::record::{FormRecord, StoredRecord, CREATED_AT_FORMAT};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An in-memory ledger store.
///
/// This store keeps all records in memory and is suitable for:
/// - Unit tests
/// - Test doubles for the ledger
///
/// # Sharing
///
/// Clones share the same rows. Two ledgers holding clones of one store
/// behave like two application instances pointed at the same store file.
///
/// # Example
///
/// ```rust
/// use routecard_storage::{FormRecord, InMemoryStore, LedgerStore};
///
/// let mut store = InMemoryStore::new();
/// store.insert(&FormRecord::new("К25/03-001")).unwrap();
/// assert_eq!(store.count().unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<String, StoredRecord>,
    last_id: i64,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored record, ascending by cluster number.
    #[must_use]
    pub fn records(&self) -> Vec<StoredRecord> {
        self.state.read().rows.values().cloned().collect()
    }
}

impl LedgerStore for InMemoryStore {
    fn insert(&mut self, record: &FormRecord) -> StorageResult<StoredRecord> {
        let mut state = self.state.write();
        if state.rows.contains_key(&record.cluster_number) {
            return Err(StorageError::duplicate(&record.cluster_number));
        }

        state.last_id += 1;
        let stored = StoredRecord {
            id: state.last_id,
            record: record.clone(),
            created_at: chrono::Local::now().format(CREATED_AT_FORMAT).to_string(),
        };
        state
            .rows
            .insert(record.cluster_number.clone(), stored.clone());
        Ok(stored)
    }

    fn get(&self, cluster_number: &str) -> StorageResult<Option<StoredRecord>> {
        Ok(self.state.read().rows.get(cluster_number).cloned())
    }

    fn max_with_prefix(&self, prefix: &str) -> StorageResult<Option<String>> {
        let state = self.state.read();
        Ok(state
            .rows
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .last()
            .map(|(key, _)| key.clone()))
    }

    fn list_with_prefix(&self, prefix: &str) -> StorageResult<Vec<StoredRecord>> {
        let state = self.state.read();
        Ok(state
            .rows
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn count(&self) -> StorageResult<u64> {
        Ok(self.state.read().rows.len() as u64)
    }
}
