//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An error reported by SQLite.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record with this cluster number is already stored.
    #[error("cluster number {cluster_number} is already recorded")]
    Duplicate {
        /// The conflicting cluster number.
        cluster_number: String,
    },

    /// A stored row could not be read back.
    #[error("store corrupted: {0}")]
    Corrupted(String),
}

impl StorageError {
    /// Creates a duplicate error for the given cluster number.
    pub fn duplicate(cluster_number: impl Into<String>) -> Self {
        Self::Duplicate {
            cluster_number: cluster_number.into(),
        }
    }

    /// Returns true if this error is a uniqueness violation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
