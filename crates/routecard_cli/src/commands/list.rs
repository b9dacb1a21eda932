//! List command implementation.

use super::open_existing;
use chrono::Local;
use routecard_core::{ClusterMonth, LedgerConfig};

/// Lists the route cards of a month (the current month by default).
pub fn run(
    config: &LedgerConfig,
    month: Option<&str>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let month = match month {
        Some(text) => text.parse::<ClusterMonth>()?,
        None => ClusterMonth::from_date(Local::now().date_naive()),
    };
    let ledger = open_existing(config)?;
    let cards = ledger.list_month(month)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    println!("Route cards for {month}: {}", cards.len());
    for card in &cards {
        let record = card.record();
        println!(
            "  {}  {:<24} glued {} by {}, recorded {}",
            card.cluster_number(),
            record.cast_number.as_deref().unwrap_or("-"),
            record.gluing_date,
            record.gluing_executor,
            card.created_at()
        );
    }
    Ok(())
}
