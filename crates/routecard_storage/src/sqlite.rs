//! SQLite-backed ledger store.

use crate::backend::LedgerStore;
use crate::error::{StorageError, StorageResult};
use crate::record::{FormRecord, StoredRecord};
use crate::schema::{self, CREATED_AT_SQL, RECORD_COLUMNS, ROUTE_CARDS_TABLE};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// How long a write waits for another process holding the file lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A ledger store backed by a single SQLite connection.
///
/// Uniqueness of cluster numbers is a `UNIQUE` constraint on the table, so it
/// holds across every process that opens the same file. Each insert is a
/// single statement and therefore atomic.
///
/// # Example
///
/// ```no_run
/// use routecard_storage::{FormRecord, LedgerStore, SqliteStore};
/// use std::path::Path;
///
/// let mut store = SqliteStore::open(Path::new("route_cards.db")).unwrap();
/// store.insert(&FormRecord::new("К25/03-001")).unwrap();
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates a store at the given path with the default busy
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens or creates a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open_with_timeout(path: &Path, busy_timeout: Duration) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        schema::ensure_ledger_schema(&conn)?;
        debug!("opened ledger store");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens or creates a store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the store cannot
    /// be opened.
    pub fn open_with_create_dirs(path: &Path, busy_timeout: Duration) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::open_with_timeout(path, busy_timeout)
    }

    /// Opens a private in-memory SQLite store.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::ensure_ledger_schema(&conn)?;
        debug!("opened in-memory ledger store");
        Ok(Self { conn, path: None })
    }

    /// Returns the path of the underlying file, `None` when in memory.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn get_by_id(&self, id: i64) -> StorageResult<Option<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM {ROUTE_CARDS_TABLE} WHERE id = ?1",
            schema::select_columns()
        );
        Ok(self
            .conn
            .query_row(&sql, [id], row_to_stored)
            .optional()?)
    }
}

impl LedgerStore for SqliteStore {
    #[instrument(skip_all, fields(cluster_number = %record.cluster_number))]
    fn insert(&mut self, record: &FormRecord) -> StorageResult<StoredRecord> {
        let placeholders: Vec<String> = (1..=RECORD_COLUMNS.len())
            .map(|i| format!("?{i}"))
            .collect();
        let sql = format!(
            "INSERT INTO {ROUTE_CARDS_TABLE} ({}, created_at) VALUES ({}, {CREATED_AT_SQL})",
            RECORD_COLUMNS.join(", "),
            placeholders.join(", ")
        );

        let result = self.conn.execute(
            &sql,
            params![
                record.cluster_number,
                record.cast_number,
                record.cast_name,
                record.gluing_date,
                record.gluing_executor,
                record.gluing_quantity,
                record.gluing_notes,
                record.control_date,
                record.control_time,
                record.control_executor,
                record.control_quantity,
                record.control_notes,
            ],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                warn!("cluster number already recorded");
                return Err(StorageError::duplicate(&record.cluster_number));
            }
            Err(err) => return Err(err.into()),
        }

        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted route card");
        self.get_by_id(id)?
            .ok_or_else(|| StorageError::Corrupted(format!("row {id} vanished after insert")))
    }

    fn get(&self, cluster_number: &str) -> StorageResult<Option<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM {ROUTE_CARDS_TABLE} WHERE cluster_number = ?1",
            schema::select_columns()
        );
        Ok(self
            .conn
            .query_row(&sql, [cluster_number], row_to_stored)
            .optional()?)
    }

    fn max_with_prefix(&self, prefix: &str) -> StorageResult<Option<String>> {
        let sql = format!(
            "SELECT cluster_number FROM {ROUTE_CARDS_TABLE}
             WHERE substr(cluster_number, 1, length(?1)) = ?1
             ORDER BY cluster_number DESC
             LIMIT 1"
        );
        Ok(self
            .conn
            .query_row(&sql, [prefix], |row| row.get(0))
            .optional()?)
    }

    fn list_with_prefix(&self, prefix: &str) -> StorageResult<Vec<StoredRecord>> {
        let sql = format!(
            "SELECT {} FROM {ROUTE_CARDS_TABLE}
             WHERE substr(cluster_number, 1, length(?1)) = ?1
             ORDER BY cluster_number ASC",
            schema::select_columns()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([prefix], row_to_stored)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn count(&self) -> StorageResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {ROUTE_CARDS_TABLE}");
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| StorageError::Corrupted(format!("negative row count {count}")))
    }
}

fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    Ok(StoredRecord {
        id: row.get(0)?,
        record: FormRecord {
            cluster_number: row.get(1)?,
            cast_number: row.get(2)?,
            cast_name: row.get(3)?,
            gluing_date: text(row, 4)?,
            gluing_executor: text(row, 5)?,
            gluing_quantity: text(row, 6)?,
            gluing_notes: text(row, 7)?,
            control_date: text(row, 8)?,
            control_time: text(row, 9)?,
            control_executor: text(row, 10)?,
            control_quantity: text(row, 11)?,
            control_notes: text(row, 12)?,
        },
        created_at: row.get(13)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CREATED_AT_FORMAT;
    use tempfile::tempdir;

    fn sample(cluster_number: &str) -> FormRecord {
        FormRecord {
            cluster_number: cluster_number.to_string(),
            cast_number: Some("ЛСКМ.04.00.004-Л".to_string()),
            cast_name: Some("Держатель диагонали".to_string()),
            gluing_date: "03.03.2025".to_string(),
            gluing_executor: "Минакова".to_string(),
            gluing_quantity: "12".to_string(),
            gluing_notes: String::new(),
            control_date: "04.03.2025".to_string(),
            control_time: "09:30".to_string(),
            control_executor: "Малых".to_string(),
            control_quantity: "12".to_string(),
            control_notes: "без замечаний".to_string(),
        }
    }

    #[test]
    fn sqlite_insert_and_read_back() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let record = sample("К25/03-001");

        let stored = store.insert(&record).unwrap();
        assert_eq!(stored.record, record);
        assert!(
            chrono::NaiveDateTime::parse_from_str(&stored.created_at, CREATED_AT_FORMAT).is_ok(),
            "unexpected created_at {}",
            stored.created_at
        );

        let fetched = store.get("К25/03-001").unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert!(store.get("К25/03-002").unwrap().is_none());
    }

    #[test]
    fn sqlite_null_cast_fields_round_trip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let record = FormRecord::new("К25/03-001");

        let stored = store.insert(&record).unwrap();
        assert_eq!(stored.record.cast_number, None);
        assert_eq!(stored.record.cast_name, None);
    }

    #[test]
    fn sqlite_duplicate_is_rejected() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(&sample("К25/03-001")).unwrap();

        let err = store.insert(&sample("К25/03-001")).unwrap_err();
        assert!(err.is_duplicate(), "unexpected error {err}");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn sqlite_prefix_queries() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for number in ["К25/03-007", "К25/02-099", "К25/03-001", "К24/03-500"] {
            store.insert(&sample(number)).unwrap();
        }

        assert_eq!(
            store.max_with_prefix("К25/03-").unwrap().as_deref(),
            Some("К25/03-007")
        );
        assert_eq!(store.max_with_prefix("К25/12-").unwrap(), None);

        let listed: Vec<String> = store
            .list_with_prefix("К25/03-")
            .unwrap()
            .into_iter()
            .map(|row| row.record.cluster_number)
            .collect();
        assert_eq!(listed, vec!["К25/03-001", "К25/03-007"]);
    }

    #[test]
    fn sqlite_prefix_is_not_a_pattern() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert(&sample("К25/03-001")).unwrap();

        assert_eq!(store.max_with_prefix("К25_03-").unwrap(), None);
        assert_eq!(store.max_with_prefix("%").unwrap(), None);
    }

    #[test]
    fn sqlite_file_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.db");

        {
            let mut store =
                SqliteStore::open_with_create_dirs(&path, DEFAULT_BUSY_TIMEOUT).unwrap();
            store.insert(&sample("К25/03-001")).unwrap();
            assert_eq!(store.path(), Some(path.as_path()));
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.get("К25/03-001").unwrap().is_some());
    }

    #[test]
    fn sqlite_two_connections_share_uniqueness() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        let mut first = SqliteStore::open(&path).unwrap();
        let mut second = SqliteStore::open(&path).unwrap();

        first.insert(&sample("К25/03-001")).unwrap();
        let err = second.insert(&sample("К25/03-001")).unwrap_err();
        assert!(err.is_duplicate());
    }
}
