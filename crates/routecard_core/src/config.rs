//! Ledger configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for opening a file-backed ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Location of the history database.
    pub ledger_path: PathBuf,

    /// Location of the reference catalog database.
    pub reference_path: PathBuf,

    /// How long a write waits for another instance holding the file lock.
    pub busy_timeout: Duration,

    /// Whether to create the ledger file if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("история_форм.db"),
            reference_path: PathBuf::from("справочник.db"),
            busy_timeout: Duration::from_secs(5),
            create_if_missing: true,
        }
    }
}

impl LedgerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the history database location.
    #[must_use]
    pub fn ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Sets the reference catalog location.
    #[must_use]
    pub fn reference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_path = path.into();
        self
    }

    /// Sets the busy timeout.
    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to create the ledger if missing.
    #[must_use]
    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LedgerConfig::default();
        assert!(config.create_if_missing);
        assert_eq!(config.ledger_path, PathBuf::from("история_форм.db"));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_pattern() {
        let config = LedgerConfig::new()
            .ledger_path("/tmp/ledger.db")
            .create_if_missing(false)
            .busy_timeout(Duration::from_millis(250));

        assert!(!config.create_if_missing);
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/ledger.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }
}
