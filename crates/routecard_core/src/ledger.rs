//! The cluster ledger.

use crate::card::RouteCard;
use crate::config::LedgerConfig;
use crate::error::{FormatError, LedgerError, LedgerResult};
use crate::input::parse_form_date;
use crate::types::{self, ClusterMonth, ClusterNumber};
use chrono::NaiveDate;
use routecard_storage::{FormRecord, InMemoryStore, LedgerStore, SqliteStore};
use tracing::{debug, info, instrument};

/// Allocates cluster numbers and records completed route cards.
///
/// The ledger holds no state of its own beyond the injected store. Every
/// allocation is recomputed from the store, and nothing is reserved: two
/// ledgers on the same store can hand out the same number, and the store's
/// uniqueness constraint makes the second [`Ledger::save`] fail with
/// [`LedgerError::Duplicate`].
///
/// Records are write-once. There is no update or delete.
#[derive(Debug)]
pub struct Ledger<S: LedgerStore> {
    store: S,
}

impl Ledger<SqliteStore> {
    /// Opens the file-backed ledger described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::LedgerMissing`] if the file does not exist and
    /// `create_if_missing` is off, or a storage error if it cannot be opened.
    #[instrument(skip_all, fields(path = %config.ledger_path.display()))]
    pub fn open(config: &LedgerConfig) -> LedgerResult<Self> {
        if !config.create_if_missing && !config.ledger_path.exists() {
            return Err(LedgerError::LedgerMissing {
                path: config.ledger_path.clone(),
            });
        }
        let store = SqliteStore::open_with_create_dirs(&config.ledger_path, config.busy_timeout)?;
        Ok(Self::new(store))
    }
}

impl Ledger<InMemoryStore> {
    /// A ledger over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Creates a ledger over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the ledger, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Checks a manually typed cluster number. See [`crate::validate`].
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] for anything but `К{YY}/{MM}-{NNN}`.
    pub fn validate(candidate: &str) -> Result<(), FormatError> {
        types::validate(candidate)
    }

    /// Computes the next cluster number for the month of `gluing_date`.
    ///
    /// The result is one past the greatest number already recorded for that
    /// month, or `001` if there is none. Gaps left by numbers that were
    /// allocated but never saved are not filled. Nothing is reserved: calling
    /// this twice without a save returns the same number.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Allocation`] once `999` is recorded for the
    /// month, or a storage error.
    #[instrument(skip(self))]
    pub fn allocate_next(&self, gluing_date: NaiveDate) -> LedgerResult<ClusterNumber> {
        let month = ClusterMonth::from_date(gluing_date);
        let latest = self.store.max_with_prefix(&month.prefix())?;

        let next = match latest {
            None => month.first(),
            Some(text) => {
                let last: ClusterNumber = text.parse().map_err(|err: FormatError| {
                    LedgerError::corrupted(format!("stored cluster number {text:?}: {err}"))
                })?;
                last.next().ok_or(LedgerError::Allocation { month })?
            }
        };

        debug!(%next, "allocated cluster number");
        Ok(next)
    }

    /// Like [`Ledger::allocate_next`], taking the gluing date as typed
    /// (`dd.mm.yyyy`).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Input`] for a malformed date, otherwise as
    /// [`Ledger::allocate_next`].
    pub fn allocate_next_for(&self, gluing_date: &str) -> LedgerResult<ClusterNumber> {
        self.allocate_next(parse_form_date(gluing_date)?)
    }

    /// Records a completed route card.
    ///
    /// The cluster number is validated first. The store assigns the creation
    /// timestamp; the returned card is the row as stored.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] for a malformed cluster number,
    /// [`LedgerError::Duplicate`] if it is already recorded, or a storage
    /// error. Nothing is written on error.
    #[instrument(skip_all, fields(cluster_number = %record.cluster_number))]
    pub fn save(&mut self, record: &FormRecord) -> LedgerResult<RouteCard> {
        types::validate(&record.cluster_number).map_err(LedgerError::Validation)?;

        let stored = self.store.insert(record)?;
        let card = RouteCard::try_from(stored)?;
        info!(id = card.id(), created_at = card.created_at(), "route card recorded");
        Ok(card)
    }

    /// Reads a recorded card back by cluster number.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn get(&self, cluster_number: ClusterNumber) -> LedgerResult<Option<RouteCard>> {
        self.store
            .get(&cluster_number.to_string())?
            .map(RouteCard::try_from)
            .transpose()
            .map_err(LedgerError::from)
    }

    /// Every card recorded for `month`, ascending by cluster number.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn list_month(&self, month: ClusterMonth) -> LedgerResult<Vec<RouteCard>> {
        self.store
            .list_with_prefix(&month.prefix())?
            .into_iter()
            .map(|stored| RouteCard::try_from(stored).map_err(LedgerError::from))
            .collect()
    }

    /// Number of recorded cards.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn count(&self) -> LedgerResult<u64> {
        Ok(self.store.count()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routecard_storage::StorageError;
    use tempfile::tempdir;

    fn march_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn seed(ledger: &mut Ledger<InMemoryStore>, numbers: &[&str]) {
        for number in numbers {
            ledger.save(&FormRecord::new(*number)).unwrap();
        }
    }

    #[test]
    fn allocate_starts_at_one() {
        let ledger = Ledger::in_memory();
        assert_eq!(ledger.allocate_next(march_2025()).unwrap().to_string(), "К25/03-001");
    }

    #[test]
    fn allocate_is_idempotent_without_save() {
        let mut ledger = Ledger::in_memory();
        seed(&mut ledger, &["К25/03-001"]);

        let first = ledger.allocate_next(march_2025()).unwrap();
        let second = ledger.allocate_next(march_2025()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "К25/03-002");
    }

    #[test]
    fn allocate_follows_max_not_count() {
        let mut ledger = Ledger::in_memory();
        seed(&mut ledger, &["К25/03-001", "К25/03-007"]);

        assert_eq!(ledger.allocate_next(march_2025()).unwrap().to_string(), "К25/03-008");
    }

    #[test]
    fn allocate_is_scoped_to_the_month() {
        let mut ledger = Ledger::in_memory();
        seed(&mut ledger, &["К25/02-120", "К24/03-050", "К25/04-003"]);

        assert_eq!(ledger.allocate_next(march_2025()).unwrap().to_string(), "К25/03-001");
    }

    #[test]
    fn allocate_fails_when_month_is_exhausted() {
        let mut ledger = Ledger::in_memory();
        for sequence in 1..=999 {
            ledger
                .save(&FormRecord::new(format!("К25/03-{sequence:03}")))
                .unwrap();
        }

        let err = ledger.allocate_next(march_2025()).unwrap_err();
        assert!(
            matches!(err, LedgerError::Allocation { month } if month.to_string() == "25/03"),
            "unexpected error {err}"
        );

        let april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(ledger.allocate_next(april).unwrap().to_string(), "К25/04-001");
    }

    #[test]
    fn allocate_next_for_parses_form_dates() {
        let ledger = Ledger::in_memory();
        assert_eq!(ledger.allocate_next_for("01.12.2024").unwrap().to_string(), "К24/12-001");
        assert!(matches!(
            ledger.allocate_next_for("1.2"),
            Err(LedgerError::Input { .. })
        ));
    }

    #[test]
    fn save_rejects_duplicates() {
        let mut ledger = Ledger::in_memory();
        ledger.save(&FormRecord::new("К25/03-001")).unwrap();

        let err = ledger.save(&FormRecord::new("К25/03-001")).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Duplicate { ref cluster_number } if cluster_number == "К25/03-001"
        ));
        assert_eq!(ledger.count().unwrap(), 1);
    }

    #[test]
    fn save_validates_before_writing() {
        let mut ledger = Ledger::in_memory();

        for (candidate, expected) in [
            ("K25/3-1", "shape"),
            ("К25/13-001", "month"),
            ("К25/03-000", "sequence"),
        ] {
            let err = ledger.save(&FormRecord::new(candidate)).unwrap_err();
            let ok = match (&err, expected) {
                (LedgerError::Validation(FormatError::Shape { .. }), "shape") => true,
                (LedgerError::Validation(FormatError::MonthOutOfRange { .. }), "month") => true,
                (LedgerError::Validation(FormatError::SequenceOutOfRange { .. }), "sequence") => true,
                _ => false,
            };
            assert!(ok, "{candidate:?}: unexpected error {err}");
        }
        assert_eq!(ledger.count().unwrap(), 0);
    }

    #[test]
    fn saved_card_reads_back() {
        let mut ledger = Ledger::in_memory();
        let record = FormRecord {
            cast_number: Some("21082-3701652-Л".into()),
            cast_name: Some("Кронштейн генератора нижний".into()),
            gluing_date: "14.03.2025".into(),
            gluing_executor: "Ротарь".into(),
            gluing_quantity: "8".into(),
            control_date: "15.03.2025".into(),
            control_time: "11:40".into(),
            control_executor: "Елхова".into(),
            control_quantity: "8".into(),
            ..FormRecord::new("К25/03-001")
        };

        let saved = ledger.save(&record).unwrap();
        let number: ClusterNumber = "К25/03-001".parse().unwrap();
        let fetched = ledger.get(number).unwrap().unwrap();

        assert_eq!(fetched, saved);
        assert_eq!(fetched.record(), &record);
        assert!(!fetched.created_at().is_empty());
    }

    #[test]
    fn list_month_returns_only_that_month() {
        let mut ledger = Ledger::in_memory();
        seed(&mut ledger, &["К25/03-002", "К25/04-001", "К25/03-001"]);

        let month = ClusterMonth::new(25, 3).unwrap();
        let listed: Vec<String> = ledger
            .list_month(month)
            .unwrap()
            .iter()
            .map(|card| card.cluster_number().to_string())
            .collect();
        assert_eq!(listed, vec!["К25/03-001", "К25/03-002"]);
    }

    #[test]
    fn shared_store_second_save_loses() {
        let store = InMemoryStore::new();
        let mut first = Ledger::new(store.clone());
        let mut second = Ledger::new(store);

        let a = first.allocate_next(march_2025()).unwrap();
        let b = second.allocate_next(march_2025()).unwrap();
        assert_eq!(a, b);

        first.save(&FormRecord::new(a.to_string())).unwrap();
        let err = second.save(&FormRecord::new(b.to_string())).unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));

        assert_eq!(second.allocate_next(march_2025()).unwrap().to_string(), "К25/03-002");
    }

    #[test]
    fn corrupted_row_is_reported() {
        let mut store = InMemoryStore::new();
        store.insert(&FormRecord::new("К25/03-0x1")).unwrap();
        let ledger = Ledger::new(store);

        let err = ledger.allocate_next(march_2025()).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(StorageError::Corrupted(_))));
    }

    #[test]
    fn open_respects_create_if_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.db");

        let config = LedgerConfig::new().ledger_path(&path).create_if_missing(false);
        assert!(matches!(
            Ledger::open(&config),
            Err(LedgerError::LedgerMissing { .. })
        ));

        let config = config.create_if_missing(true);
        let mut ledger = Ledger::open(&config).unwrap();
        ledger.save(&FormRecord::new("К25/03-001")).unwrap();
        drop(ledger);

        let reopened = Ledger::open(&config.create_if_missing(false)).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
