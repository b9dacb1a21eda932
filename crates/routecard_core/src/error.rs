//! Error types for the route card ledger.

use crate::types::ClusterMonth;
use routecard_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// A cluster number that does not have the `К{YY}/{MM}-{NNN}` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Wrong characters, digit counts or separators.
    #[error("invalid cluster number {candidate:?}: expected К{{YY}}/{{MM}}-{{NNN}}, for example К25/03-001")]
    Shape {
        /// The rejected text.
        candidate: String,
    },

    /// Month outside 01..=12.
    #[error("invalid month {month:02} in cluster number (must be 01 to 12)")]
    MonthOutOfRange {
        /// The parsed month.
        month: u8,
    },

    /// Sequence outside 001..=999.
    #[error("invalid sequence {sequence:03} in cluster number (must be 001 to 999)")]
    SequenceOutOfRange {
        /// The parsed sequence.
        sequence: u16,
    },
}

/// Errors reported by the ledger.
///
/// None of them are fatal: the caller can correct the input and try again.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Every sequence number of the month is taken.
    #[error("sequence exhausted for {month}: all 999 cluster numbers of the month are taken")]
    Allocation {
        /// The exhausted month.
        month: ClusterMonth,
    },

    /// The cluster number is already recorded.
    #[error("cluster number {cluster_number} is already recorded; allocate a new one")]
    Duplicate {
        /// The conflicting cluster number.
        cluster_number: String,
    },

    /// The record's cluster number failed validation at save time.
    #[error("route card rejected: {0}")]
    Validation(#[source] FormatError),

    /// Malformed form input caught before it reached the ledger.
    #[error("invalid input: {message}")]
    Input {
        /// What was wrong.
        message: String,
    },

    /// The ledger file does not exist and creation was disabled.
    #[error("ledger not found at {}", path.display())]
    LedgerMissing {
        /// Expected location of the ledger.
        path: PathBuf,
    },

    /// Store failure other than a uniqueness violation.
    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
}

impl LedgerError {
    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Creates a storage corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Storage(StorageError::Corrupted(message.into()))
    }
}

impl From<StorageError> for LedgerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { cluster_number } => Self::Duplicate { cluster_number },
            other => Self::Storage(other),
        }
    }
}
