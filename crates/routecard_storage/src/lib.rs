//! # Route Card Storage
//!
//! Persisted stores behind the route card ledger.
//!
//! Stores keep completed route-card records and enforce the one rule the
//! ledger relies on for correctness: a cluster number appears at most once.
//! They know nothing about the cluster-number format or the allocation
//! algorithm; those live in `routecard_core`.
//!
//! ## Available Stores
//!
//! - [`SqliteStore`] - SQLite file (or in-memory) store, the production backend
//! - [`InMemoryStore`] - Process-local store for tests; clones share rows
//!
//! The [`ReferenceCatalog`] is a separate read-mostly SQLite database with
//! the shop's personnel and casting lists.
//!
//! ## Example
//!
//! ```rust
//! use routecard_storage::{FormRecord, InMemoryStore, LedgerStore};
//!
//! let mut store = InMemoryStore::new();
//! let record = FormRecord::new("К25/03-001");
//! let stored = store.insert(&record).unwrap();
//! assert_eq!(stored.record.cluster_number, "К25/03-001");
//! assert!(store.insert(&record).is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod memory;
mod record;
mod reference;
mod schema;
mod sqlite;

pub use backend::LedgerStore;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use record::{FormRecord, StoredRecord, CREATED_AT_FORMAT};
pub use reference::{Casting, CastingFamily, ReferenceCatalog, ReferenceList};
pub use sqlite::SqliteStore;
