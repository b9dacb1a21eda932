//! Next command implementation.

use super::open_existing;
use routecard_core::{parse_form_date, LedgerConfig};

/// Prints the next cluster number for a gluing date (today by default).
pub fn run(config: &LedgerConfig, date: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = open_existing(config)?;
    let date = match date {
        Some(text) => parse_form_date(text)?,
        None => chrono::Local::now().date_naive(),
    };

    let number = ledger.allocate_next(date)?;
    println!("{number}");
    Ok(())
}
