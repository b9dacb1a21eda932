//! # Route Card Testkit
//!
//! Test utilities for the route card ledger.
//!
//! This crate provides:
//! - Ledger fixtures over in-memory and temporary SQLite stores
//! - Property-based generators using proptest
//! - A harness that checks every saved card against what was submitted
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routecard_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_ledger() {
//!     with_file_ledger(|ledger| {
//!         let number = ledger.allocate_next(date(2025, 3, 14)).unwrap();
//!         // ... test operations
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
