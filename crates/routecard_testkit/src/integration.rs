//! Cross-crate integration test helpers.
//!
//! Exercises the ledger over every store the storage crate provides.

use crate::fixtures::date;
use routecard_core::{
    ClusterMonth, ClusterNumber, FormRecord, Ledger, LedgerError, LedgerStore, RouteCard,
};
use std::collections::BTreeMap;

/// A test harness that remembers every submitted record and checks the
/// ledger hands back exactly that.
pub struct LedgerHarness<S: LedgerStore> {
    /// The ledger instance.
    pub ledger: Ledger<S>,
    /// Submitted records by cluster number.
    saved: BTreeMap<String, FormRecord>,
}

impl<S: LedgerStore> LedgerHarness<S> {
    /// Wraps a ledger.
    pub fn new(ledger: Ledger<S>) -> Self {
        Self {
            ledger,
            saved: BTreeMap::new(),
        }
    }

    /// Saves a record and tracks it for later verification.
    pub fn save(&mut self, record: FormRecord) -> RouteCard {
        let card = self.ledger.save(&record).expect("Failed to save route card");
        assert_eq!(card.record(), &record, "Stored record differs from submitted");
        assert!(!card.created_at().is_empty(), "created_at must be set");
        self.saved.insert(record.cluster_number.clone(), record);
        card
    }

    /// Allocates the next number for the record's gluing date and saves it.
    pub fn save_allocated(&mut self, mut record: FormRecord) -> RouteCard {
        let number = self
            .ledger
            .allocate_next_for(&record.gluing_date)
            .expect("Failed to allocate cluster number");
        record.cluster_number = number.to_string();
        self.save(record)
    }

    /// Reads a card back and checks it against the tracked record.
    pub fn get_and_verify(&self, number: ClusterNumber) -> Option<RouteCard> {
        let card = self.ledger.get(number).expect("Failed to read route card");

        if let Some(expected) = self.saved.get(&number.to_string()) {
            let actual = card.as_ref().map(RouteCard::record);
            assert_eq!(actual, Some(expected), "Route card mismatch for {number}");
        }

        card
    }

    /// Verifies every tracked record is in the ledger unchanged.
    pub fn verify_all(&self) {
        for (number, expected) in &self.saved {
            let number: ClusterNumber = number.parse().expect("Tracked number is valid");
            let card = self.ledger.get(number).expect("Failed to read route card");
            assert_eq!(card.as_ref().map(RouteCard::record), Some(expected));
        }
        assert_eq!(
            self.ledger.count().expect("Failed to count"),
            self.saved.len() as u64
        );
    }

    /// Returns the count of tracked records.
    pub fn tracked_count(&self) -> usize {
        self.saved.len()
    }
}

/// Allocation properties that must hold for any store.
pub mod allocation {
    use super::*;
    use crate::fixtures::scenarios::{fill_month, populate};

    /// An empty month starts at 001.
    pub fn test_starts_at_one<S: LedgerStore>(ledger: &Ledger<S>) {
        let number = ledger
            .allocate_next(date(2025, 3, 14))
            .expect("Failed to allocate");
        assert_eq!(number.to_string(), "К25/03-001");
    }

    /// Allocation follows the greatest number, not the count, and skips gaps.
    pub fn test_follows_maximum<S: LedgerStore>(ledger: &mut Ledger<S>) {
        populate(ledger, &["К25/03-001", "К25/03-007"]);
        let number = ledger
            .allocate_next(date(2025, 3, 20))
            .expect("Failed to allocate");
        assert_eq!(number.to_string(), "К25/03-008");
    }

    /// Other months never influence allocation.
    pub fn test_month_scoped<S: LedgerStore>(ledger: &mut Ledger<S>) {
        populate(ledger, &["К25/02-050", "К24/03-100", "К25/04-001"]);
        let number = ledger
            .allocate_next(date(2025, 3, 1))
            .expect("Failed to allocate");
        assert_eq!(number.to_string(), "К25/03-001");
    }

    /// Allocation without a save returns the same number again.
    pub fn test_idempotent_without_save<S: LedgerStore>(ledger: &Ledger<S>) {
        let day = date(2025, 3, 14);
        let first = ledger.allocate_next(day).expect("Failed to allocate");
        let second = ledger.allocate_next(day).expect("Failed to allocate");
        assert_eq!(first, second);
    }

    /// With all 999 numbers of a month recorded, allocation fails for that
    /// month and still starts at 001 for the next one.
    pub fn test_exhaustion<S: LedgerStore>(ledger: &mut Ledger<S>) {
        fill_month(ledger, 25, 3);
        assert_eq!(ledger.count().expect("Failed to count"), 999);

        let err = ledger
            .allocate_next(date(2025, 3, 14))
            .expect_err("Allocation past 999 must fail");
        let expected = ClusterMonth::new(25, 3).expect("Valid month");
        assert!(matches!(err, LedgerError::Allocation { month } if month == expected));

        let april = ledger
            .allocate_next(date(2025, 4, 1))
            .expect("Failed to allocate");
        assert_eq!(april.to_string(), "К25/04-001");
    }

    /// A lone 999 exhausts the month even with gaps below it.
    pub fn test_exhaustion_with_gaps<S: LedgerStore>(ledger: &mut Ledger<S>) {
        populate(ledger, &["К25/03-999"]);
        let err = ledger
            .allocate_next(date(2025, 3, 14))
            .expect_err("Allocation past 999 must fail");
        assert!(matches!(err, LedgerError::Allocation { .. }));
    }
}

/// Uniqueness properties that must hold for any store.
pub mod uniqueness {
    use super::*;
    use crate::fixtures::sample_record;

    /// A second save of the same number fails and leaves the first intact.
    pub fn test_duplicate_rejected<S: LedgerStore>(ledger: &mut Ledger<S>) {
        let first = sample_record("К25/03-001");
        ledger.save(&first).expect("Failed to save");

        let mut second = sample_record("К25/03-001");
        second.gluing_executor = "Другой".to_string();
        let err = ledger.save(&second).expect_err("Duplicate must fail");
        match err {
            LedgerError::Duplicate { cluster_number } => assert_eq!(cluster_number, "К25/03-001"),
            other => panic!("Expected duplicate, got {other:?}"),
        }

        let number: ClusterNumber = "К25/03-001".parse().expect("Valid number");
        let stored = ledger.get(number).expect("Failed to read").expect("Card exists");
        assert_eq!(stored.record(), &first);
        assert_eq!(ledger.count().expect("Failed to count"), 1);
    }

    /// Two instances allocate the same number; only the first save wins.
    pub fn test_concurrent_instances<A: LedgerStore, B: LedgerStore>(
        first: &mut Ledger<A>,
        second: &mut Ledger<B>,
    ) {
        let day = date(2025, 3, 14);
        let a = first.allocate_next(day).expect("Failed to allocate");
        let b = second.allocate_next(day).expect("Failed to allocate");
        assert_eq!(a, b, "Allocation is advisory and may collide");

        first
            .save(&sample_record(&a.to_string()))
            .expect("First save wins");
        let err = second
            .save(&sample_record(&b.to_string()))
            .expect_err("Second save must fail");
        assert!(matches!(err, LedgerError::Duplicate { .. }));

        let retry = second.allocate_next(day).expect("Failed to allocate");
        assert_eq!(retry, a.next().expect("Not exhausted"));
    }
}
