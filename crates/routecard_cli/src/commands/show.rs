//! Show command implementation.

use super::{cast_label, open_catalog, open_existing, render_card};
use routecard_core::{ClusterNumber, LedgerConfig};

/// Prints a recorded route card.
pub fn run(
    config: &LedgerConfig,
    number: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let number: ClusterNumber = number.parse()?;
    let ledger = open_existing(config)?;
    let card = ledger
        .get(number)?
        .ok_or_else(|| format!("no route card recorded for {number}"))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&card)?),
        _ => {
            let catalog = open_catalog(config);
            println!("{}", render_card(&card, &cast_label(&card, catalog.as_ref())));
        }
    }
    Ok(())
}
