//! Route card rows as stores see them.

use serde::{Deserialize, Serialize};

/// `chrono`/`strftime` format of the `created_at` column.
pub const CREATED_AT_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// One completed route-card transaction, as submitted for storage.
///
/// The cluster number is kept as entered; the ledger validates it before a
/// record reaches a store. There is no creation timestamp here: stores assign
/// it at insert time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    /// Cluster number, `К{YY}/{MM}-{NNN}`.
    pub cluster_number: String,
    /// Cast (model) number.
    pub cast_number: Option<String>,
    /// Cast (model) name.
    pub cast_name: Option<String>,
    /// Gluing step: date.
    pub gluing_date: String,
    /// Gluing step: executor.
    pub gluing_executor: String,
    /// Gluing step: quantity.
    pub gluing_quantity: String,
    /// Gluing step: notes.
    pub gluing_notes: String,
    /// Assembly control: date.
    pub control_date: String,
    /// Assembly control: time.
    pub control_time: String,
    /// Assembly control: executor.
    pub control_executor: String,
    /// Assembly control: quantity.
    pub control_quantity: String,
    /// Assembly control: notes.
    pub control_notes: String,
}

impl FormRecord {
    /// Creates a record with only the cluster number set.
    #[must_use]
    pub fn new(cluster_number: impl Into<String>) -> Self {
        Self {
            cluster_number: cluster_number.into(),
            ..Self::default()
        }
    }
}

/// A record read back from a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Row id assigned by the store.
    pub id: i64,
    /// The record as it was inserted.
    #[serde(flatten)]
    pub record: FormRecord,
    /// Insert time, formatted with [`CREATED_AT_FORMAT`].
    pub created_at: String,
}
