//! Property-based test generators using proptest.
//!
//! Provides strategies for generating cluster numbers, gluing dates and
//! form records that hold the ledger's invariants.

use chrono::NaiveDate;
use proptest::prelude::*;
use routecard_core::{ClusterMonth, ClusterNumber, FormRecord, MAX_SEQUENCE};

/// Strategy for generating valid cluster months.
pub fn cluster_month_strategy() -> impl Strategy<Value = ClusterMonth> {
    (0u8..=99, 1u8..=12)
        .prop_map(|(year, month)| ClusterMonth::new(year, month).expect("Invalid cluster month"))
}

/// Strategy for generating valid cluster numbers.
pub fn cluster_number_strategy() -> impl Strategy<Value = ClusterNumber> {
    (cluster_month_strategy(), 1u16..=MAX_SEQUENCE).prop_map(|(month, sequence)| {
        ClusterNumber::new(month, sequence).expect("Invalid cluster number")
    })
}

/// Strategy for generating gluing dates across several centuries.
pub fn gluing_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1900i32..=2199, 1u32..=12, 1u32..=28).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day).expect("Invalid gluing date")
    })
}

/// Strategy for strings that are not valid cluster numbers.
///
/// Covers a Latin `K`, missing padding, a zero sequence, an out-of-range
/// month and trailing text.
pub fn malformed_cluster_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..=99, 1u8..=12, 1u16..=999)
            .prop_map(|(y, m, n)| format!("K{y:02}/{m:02}-{n:03}")),
        (0u8..=99, 1u8..=9, 1u16..=999).prop_map(|(y, m, n)| format!("К{y:02}/{m}-{n:03}")),
        (0u8..=99, 1u8..=12).prop_map(|(y, m)| format!("К{y:02}/{m:02}-000")),
        (0u8..=99, 13u8..=99, 1u16..=999)
            .prop_map(|(y, m, n)| format!("К{y:02}/{m:02}-{n:03}")),
        (cluster_number_strategy(), "[a-z ]{1,4}")
            .prop_map(|(number, tail)| format!("{number}{tail}")),
    ]
}

/// Strategy for free-text form fields.
pub fn form_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[а-яА-Я0-9 .,-]{0,24}").expect("Invalid regex")
}

/// Strategy for form records with a valid cluster number.
pub fn form_record_strategy() -> impl Strategy<Value = FormRecord> {
    (
        cluster_number_strategy(),
        prop::option::of(form_text_strategy()),
        prop::option::of(form_text_strategy()),
        gluing_date_strategy(),
        prop::collection::vec(form_text_strategy(), 7),
    )
        .prop_map(|(number, cast_number, cast_name, gluing, text)| FormRecord {
            cluster_number: number.to_string(),
            cast_number,
            cast_name,
            gluing_date: gluing.format("%d.%m.%Y").to_string(),
            gluing_executor: text[0].clone(),
            gluing_quantity: text[1].clone(),
            gluing_notes: text[2].clone(),
            control_date: String::new(),
            control_time: String::new(),
            control_executor: text[3].clone(),
            control_quantity: text[4].clone(),
            control_notes: format!("{} {}", text[5], text[6]),
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routecard_core::validate;

    proptest! {
        #![proptest_config(PropTestConfig::default().to_proptest_config())]

        #[test]
        fn cluster_number_round_trips(number in cluster_number_strategy()) {
            let text = number.to_string();
            prop_assert!(validate(&text).is_ok());
            prop_assert_eq!(text.parse::<ClusterNumber>().unwrap(), number);
        }

        #[test]
        fn cluster_number_has_fixed_width(number in cluster_number_strategy()) {
            // К + YY + / + MM + - + NNN
            prop_assert_eq!(number.to_string().chars().count(), 10);
        }

        #[test]
        fn malformed_numbers_are_rejected(candidate in malformed_cluster_strategy()) {
            prop_assert!(validate(&candidate).is_err());
        }

        #[test]
        fn string_order_matches_sequence_order(
            month in cluster_month_strategy(),
            a in 1u16..=MAX_SEQUENCE,
            b in 1u16..=MAX_SEQUENCE,
        ) {
            let left = ClusterNumber::new(month, a).unwrap();
            let right = ClusterNumber::new(month, b).unwrap();
            prop_assert_eq!(left.to_string().cmp(&right.to_string()), a.cmp(&b));
        }
    }

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_records_are_valid(record in form_record_strategy()) {
            prop_assert!(validate(&record.cluster_number).is_ok());
            prop_assert!(routecard_core::parse_form_date(&record.gluing_date).is_ok());
        }
    }
}
