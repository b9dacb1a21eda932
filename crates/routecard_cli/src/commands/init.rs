//! Init command implementation.

use routecard_core::{Ledger, LedgerConfig};
use routecard_storage::ReferenceCatalog;
use tracing::info;

/// Creates the ledger (if missing) and seeds the reference catalog.
pub fn run(config: &LedgerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = Ledger::open(config)?;
    info!("ledger ready at {:?}", config.ledger_path);

    let mut catalog = ReferenceCatalog::open(&config.reference_path)?;
    let filled = catalog.seed_defaults()?;

    println!("✓ Ledger ready");
    println!("  Path: {:?}", config.ledger_path);
    println!("  Route cards: {}", ledger.count()?);
    println!("✓ Reference catalog ready");
    println!("  Path: {:?}", config.reference_path);
    println!("  Tables seeded: {filled}");

    Ok(())
}
