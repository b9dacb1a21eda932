//! Test fixtures and ledger helpers.
//!
//! Provides convenience functions for setting up test ledgers
//! and common test scenarios.

use chrono::NaiveDate;
use routecard_core::{FormRecord, InMemoryStore, Ledger, LedgerConfig, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A ledger over a temporary SQLite file with automatic cleanup.
pub struct TestLedger {
    /// The ledger instance.
    pub ledger: Ledger<SqliteStore>,
    path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestLedger {
    /// Creates a ledger over a fresh SQLite file.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("история_форм.db");
        let ledger = Ledger::open(&LedgerConfig::new().ledger_path(&path))
            .expect("Failed to open file ledger");

        Self {
            ledger,
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a second, independent ledger on the same file, as another
    /// running instance of the application would.
    pub fn second_instance(&self) -> Ledger<SqliteStore> {
        Ledger::open(&LedgerConfig::new().ledger_path(&self.path).create_if_missing(false))
            .expect("Failed to open second ledger instance")
    }
}

impl std::ops::Deref for TestLedger {
    type Target = Ledger<SqliteStore>;

    fn deref(&self) -> &Self::Target {
        &self.ledger
    }
}

impl std::ops::DerefMut for TestLedger {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ledger
    }
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Invalid test date")
}

/// A fully filled-in record for the given cluster number.
pub fn sample_record(cluster_number: &str) -> FormRecord {
    FormRecord {
        cluster_number: cluster_number.to_string(),
        cast_number: Some("ЛСКМ.03.01.102-Л1".to_string()),
        cast_name: Some("Держатель ригеля".to_string()),
        gluing_date: "14.03.2025".to_string(),
        gluing_executor: "Буцик".to_string(),
        gluing_quantity: "24".to_string(),
        gluing_notes: "две партии".to_string(),
        control_date: "15.03.2025".to_string(),
        control_time: "08:15".to_string(),
        control_executor: "Шестункина".to_string(),
        control_quantity: "24".to_string(),
        control_notes: String::new(),
    }
}

/// Runs a test with a temporary in-memory ledger.
///
/// # Example
///
/// ```rust,ignore
/// use routecard_testkit::with_memory_ledger;
///
/// #[test]
/// fn my_test() {
///     with_memory_ledger(|ledger| {
///         assert_eq!(ledger.count().unwrap(), 0);
///     });
/// }
/// ```
pub fn with_memory_ledger<F, R>(f: F) -> R
where
    F: FnOnce(&mut Ledger<InMemoryStore>) -> R,
{
    let mut ledger = Ledger::in_memory();
    f(&mut ledger)
}

/// Runs a test with a ledger over a temporary SQLite file.
pub fn with_file_ledger<F, R>(f: F) -> R
where
    F: FnOnce(&mut Ledger<SqliteStore>) -> R,
{
    let mut test_ledger = TestLedger::file();
    f(&mut test_ledger.ledger)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use routecard_core::LedgerStore;

    /// Saves a sample record for each cluster number.
    pub fn populate<S: LedgerStore>(ledger: &mut Ledger<S>, numbers: &[&str]) {
        for number in numbers {
            ledger
                .save(&sample_record(number))
                .expect("Failed to save route card");
        }
    }

    /// An in-memory ledger holding the given cluster numbers.
    pub fn ledger_with(numbers: &[&str]) -> Ledger<InMemoryStore> {
        let mut ledger = Ledger::in_memory();
        populate(&mut ledger, numbers);
        ledger
    }

    /// Records every sequence of `year`/`month`, 001 through 999.
    pub fn fill_month<S: LedgerStore>(ledger: &mut Ledger<S>, year: u8, month: u8) {
        for sequence in 1..=routecard_core::MAX_SEQUENCE {
            ledger
                .save(&FormRecord::new(format!("К{year:02}/{month:02}-{sequence:03}")))
                .expect("Failed to save route card");
        }
    }

    /// An in-memory ledger whose `year`/`month` has every sequence taken.
    pub fn exhausted_month(year: u8, month: u8) -> Ledger<InMemoryStore> {
        let mut ledger = Ledger::in_memory();
        fill_month(&mut ledger, year, month);
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ledger_starts_empty() {
        let test_ledger = TestLedger::file();
        assert_eq!(test_ledger.count().unwrap(), 0);
        assert!(test_ledger.path().exists());
    }

    #[test]
    fn test_second_instance_sees_saves() {
        let mut test_ledger = TestLedger::file();
        test_ledger.save(&sample_record("К25/03-001")).unwrap();

        let other = test_ledger.second_instance();
        assert_eq!(other.count().unwrap(), 1);
    }

    #[test]
    fn test_exhausted_month_scenario() {
        let ledger = scenarios::exhausted_month(25, 3);
        assert_eq!(ledger.count().unwrap(), 999);
        assert!(ledger.allocate_next(date(2025, 3, 1)).is_err());
    }

    #[test]
    fn test_populated_scenario() {
        let ledger = scenarios::ledger_with(&["К25/03-001", "К25/03-002"]);
        assert_eq!(ledger.count().unwrap(), 2);
    }
}
