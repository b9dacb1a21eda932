//! CLI command implementations.

pub mod init;
pub mod list;
pub mod next;
pub mod reference;
pub mod save;
pub mod show;
pub mod validate;

use routecard_core::{Ledger, LedgerConfig, LedgerResult, RouteCard, SqliteStore};
use routecard_storage::ReferenceCatalog;
use std::path::Path;
use tracing::warn;

/// Opens the ledger for a command that only reads it.
pub(crate) fn open_existing(config: &LedgerConfig) -> LedgerResult<Ledger<SqliteStore>> {
    Ledger::open(&config.clone().create_if_missing(false))
}

/// Opens the reference catalog if it exists.
pub(crate) fn open_catalog(config: &LedgerConfig) -> Option<ReferenceCatalog> {
    open_catalog_at(&config.reference_path)
}

fn open_catalog_at(path: &Path) -> Option<ReferenceCatalog> {
    if !path.exists() {
        return None;
    }
    match ReferenceCatalog::open(path) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            warn!(path = %path.display(), %err, "reference catalog unavailable");
            None
        }
    }
}

/// Renders a card as the text block printed by `show` and `save`.
pub(crate) fn render_card(card: &RouteCard, cast_label: &str) -> String {
    let record = card.record();
    let mut out = String::new();
    out.push_str(&format!("Cluster number:   {}\n", card.cluster_number()));
    out.push_str(&format!("Casting:          {cast_label}\n"));
    out.push_str(&format!(
        "Gluing:           {} | {} | qty {} | {}\n",
        record.gluing_date, record.gluing_executor, record.gluing_quantity, record.gluing_notes
    ));
    out.push_str(&format!(
        "Assembly control: {} {} | {} | qty {} | {}\n",
        record.control_date,
        record.control_time,
        record.control_executor,
        record.control_quantity,
        record.control_notes
    ));
    out.push_str(&format!("Recorded at:      {}", card.created_at()));
    out
}

/// Casting line for a card, using the catalog when available.
pub(crate) fn cast_label(card: &RouteCard, catalog: Option<&ReferenceCatalog>) -> String {
    let record = card.record();
    let fallback = || {
        record
            .cast_name
            .clone()
            .or_else(|| record.cast_number.clone())
            .unwrap_or_default()
    };
    match catalog {
        Some(catalog) => catalog
            .cast_label(record.cast_number.as_deref(), record.cast_name.as_deref())
            .unwrap_or_else(|err| {
                warn!(%err, "reference catalog lookup failed, using stored cast name");
                fallback()
            }),
        None => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routecard_core::FormRecord;

    #[test]
    fn render_card_lists_both_steps() {
        let mut ledger = Ledger::new(SqliteStore::open_in_memory().unwrap());
        let card = ledger
            .save(&FormRecord {
                gluing_date: "14.03.2025".into(),
                gluing_executor: "Чернова".into(),
                control_time: "10:00".into(),
                ..FormRecord::new("К25/03-001")
            })
            .unwrap();

        let text = render_card(&card, "Адаптер ЛСКМ.98.14.001-Л");
        assert!(text.starts_with("Cluster number:   К25/03-001\n"));
        assert!(text.contains("Casting:          Адаптер ЛСКМ.98.14.001-Л"));
        assert!(text.contains("14.03.2025 | Чернова"));
        assert!(text.contains(&format!("Recorded at:      {}", card.created_at())));
    }

    #[test]
    fn cast_label_uses_catalog_then_fallback() {
        let mut ledger = Ledger::new(SqliteStore::open_in_memory().unwrap());
        let card = ledger
            .save(&FormRecord {
                cast_number: Some("ЛСКМ.98.14.001-Л".into()),
                cast_name: Some("Адаптер".into()),
                ..FormRecord::new("К25/03-001")
            })
            .unwrap();

        let mut catalog = ReferenceCatalog::open_in_memory().unwrap();
        catalog.seed_defaults().unwrap();
        assert_eq!(cast_label(&card, Some(&catalog)), "Адаптер ЛСКМ.98.14.001-Л");
        assert_eq!(cast_label(&card, None), "Адаптер");
    }

    #[test]
    fn cast_label_falls_back_when_catalog_is_unreadable() {
        let mut ledger = Ledger::new(SqliteStore::open_in_memory().unwrap());
        let card = ledger
            .save(&FormRecord {
                cast_number: Some("ЛСКМ.98.14.001-Л".into()),
                cast_name: Some("Адаптер".into()),
                ..FormRecord::new("К25/03-001")
            })
            .unwrap();

        // No tables: every lookup fails.
        let catalog = ReferenceCatalog::open_in_memory().unwrap();
        assert!(catalog.cast_label(Some("ЛСКМ.98.14.001-Л"), None).is_err());
        assert_eq!(cast_label(&card, Some(&catalog)), "Адаптер");
    }

    #[test]
    fn missing_catalog_is_not_opened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("справочник.db");
        assert!(open_catalog_at(&path).is_none());
        assert!(!path.exists());
    }
}
