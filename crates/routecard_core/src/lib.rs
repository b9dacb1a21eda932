//! # Route Card Core
//!
//! The cluster ledger: identifier format, allocation, and the append-only
//! history of completed route cards.
//!
//! This crate provides:
//! - [`ClusterNumber`] and [`ClusterMonth`], the `К{YY}/{MM}-{NNN}` value types
//! - [`validate`] for manually typed cluster numbers
//! - [`Ledger`], which allocates the next number for a gluing date and
//!   records completed forms through an injected [`LedgerStore`]
//! - [`FormDraft`], early validation of raw form input
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use routecard_core::{FormRecord, Ledger};
//!
//! let mut ledger = Ledger::in_memory();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//!
//! let number = ledger.allocate_next(date).unwrap();
//! assert_eq!(number.to_string(), "К25/03-001");
//!
//! ledger.save(&FormRecord::new(number.to_string())).unwrap();
//! assert_eq!(ledger.allocate_next(date).unwrap().to_string(), "К25/03-002");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod card;
mod config;
mod error;
mod input;
mod ledger;
mod types;

pub use card::RouteCard;
pub use config::LedgerConfig;
pub use error::{FormatError, LedgerError, LedgerResult};
pub use input::{parse_form_date, parse_form_time, FormDraft, DATE_FORMAT, TIME_FORMAT};
pub use ledger::Ledger;
pub use types::{validate, ClusterMonth, ClusterNumber, CLUSTER_PREFIX, MAX_SEQUENCE};

pub use routecard_storage::{FormRecord, InMemoryStore, LedgerStore, SqliteStore, StorageError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
