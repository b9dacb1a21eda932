//! Benchmark utilities.

use chrono::NaiveDate;
use routecard_core::{ClusterMonth, ClusterNumber, FormRecord, Ledger, LedgerStore};

/// The gluing date every benchmark allocates for.
pub fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("Invalid benchmark date")
}

/// A filled-in record for `number`.
pub fn record_for(number: ClusterNumber) -> FormRecord {
    FormRecord {
        cluster_number: number.to_string(),
        cast_number: Some("ЛСКМ.03.01.102-Л1".to_string()),
        cast_name: Some("Держатель ригеля".to_string()),
        gluing_date: bench_date().format("%d.%m.%Y").to_string(),
        gluing_executor: "Буцик".to_string(),
        gluing_quantity: "24".to_string(),
        control_executor: "Шестункина".to_string(),
        control_quantity: "24".to_string(),
        ..FormRecord::default()
    }
}

/// Months around the benchmark month that exist in the same year.
fn neighbouring_months(target: ClusterMonth) -> Vec<ClusterMonth> {
    let before = target.month().checked_sub(1);
    let after = target.month().checked_add(1);
    [before, Some(target.month()), after]
        .into_iter()
        .flatten()
        .filter_map(|month| ClusterMonth::new(target.year(), month).ok())
        .collect()
}

/// Records sequences `1..=count` of the benchmark month, plus the same
/// amount in the neighbouring months.
pub fn populate<S: LedgerStore>(ledger: &mut Ledger<S>, count: u16) {
    let target = ClusterMonth::from_date(bench_date());

    for month in neighbouring_months(target) {
        for sequence in 1..=count {
            let number = ClusterNumber::new(month, sequence).expect("Invalid benchmark sequence");
            ledger
                .save(&record_for(number))
                .expect("Failed to seed benchmark ledger");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_has_no_previous_month() {
        let january = ClusterMonth::new(25, 1).unwrap();
        let months: Vec<u8> = neighbouring_months(january).iter().map(|m| m.month()).collect();
        assert_eq!(months, vec![1, 2]);

        let december = ClusterMonth::new(25, 12).unwrap();
        let months: Vec<u8> = neighbouring_months(december).iter().map(|m| m.month()).collect();
        assert_eq!(months, vec![11, 12]);
    }

    #[test]
    fn populate_seeds_every_requested_number() {
        let mut ledger = Ledger::in_memory();
        populate(&mut ledger, 5);
        assert_eq!(ledger.count().unwrap(), 15);

        let month = ClusterMonth::from_date(bench_date());
        assert_eq!(ledger.list_month(month).unwrap().len(), 5);
    }
}
