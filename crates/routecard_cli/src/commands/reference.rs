//! Reference command implementation.

use routecard_core::LedgerConfig;
use routecard_storage::{CastingFamily, ReferenceCatalog, ReferenceList};

/// Prints one reference list, or the names of all lists.
pub fn run(config: &LedgerConfig, list: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(name) = list else {
        for list in ReferenceList::ALL {
            println!("{}", list.table());
        }
        for family in CastingFamily::ALL {
            println!("{}", family.table());
        }
        return Ok(());
    };

    if !config.reference_path.exists() {
        return Err(format!(
            "reference catalog not found at {:?}; run `routecard init`",
            config.reference_path
        )
        .into());
    }
    let catalog = ReferenceCatalog::open(&config.reference_path)?;

    if let Some(list) = ReferenceList::from_table(name) {
        for entry in catalog.names(list)? {
            println!("{entry}");
        }
        return Ok(());
    }

    let family = CastingFamily::from_table(name)
        .ok_or_else(|| format!("unknown reference list {name:?}"))?;
    for casting in catalog.castings(family)? {
        match casting.number {
            Some(number) => println!("{number}\t{}", casting.name),
            None => println!("{}", casting.name),
        }
    }
    Ok(())
}
