//! Validate command implementation.

use routecard_core::validate;

/// Checks a typed cluster number. Fails with the format error.
pub fn run(number: &str) -> Result<(), Box<dyn std::error::Error>> {
    validate(number)?;
    println!("✓ {number} is a valid cluster number");
    Ok(())
}
