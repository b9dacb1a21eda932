//! SQL schema of the ledger and reference databases.

use rusqlite::Connection;
use tracing::debug;

/// Name of the ledger table.
pub(crate) const ROUTE_CARDS_TABLE: &str = "route_cards";

/// Columns of `route_cards` in insert/select order, `id` and `created_at`
/// excluded.
pub(crate) const RECORD_COLUMNS: [&str; 12] = [
    "cluster_number",
    "cast_number",
    "cast_name",
    "gluing_date",
    "gluing_executor",
    "gluing_quantity",
    "gluing_notes",
    "control_date",
    "control_time",
    "control_executor",
    "control_quantity",
    "control_notes",
];

const CREATE_ROUTE_CARDS: &str = "
    CREATE TABLE IF NOT EXISTS route_cards (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        cluster_number   TEXT NOT NULL UNIQUE,
        cast_number      TEXT,
        cast_name        TEXT,
        gluing_date      TEXT,
        gluing_executor  TEXT,
        gluing_quantity  TEXT,
        gluing_notes     TEXT,
        control_date     TEXT,
        control_time     TEXT,
        control_executor TEXT,
        control_quantity TEXT,
        control_notes    TEXT,
        created_at       TEXT NOT NULL
    );";

/// SQL expression producing the insert timestamp in `CREATED_AT_FORMAT`.
pub(crate) const CREATED_AT_SQL: &str = "strftime('%d.%m.%Y %H:%M:%S', 'now', 'localtime')";

/// Creates the ledger table if it does not exist.
pub(crate) fn ensure_ledger_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_ROUTE_CARDS)?;
    debug!(table = ROUTE_CARDS_TABLE, "ledger schema ready");
    Ok(())
}

/// Comma-separated column list for `SELECT`, including `id` and `created_at`.
pub(crate) fn select_columns() -> String {
    let mut columns = vec!["id"];
    columns.extend(RECORD_COLUMNS);
    columns.push("created_at");
    columns.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_ledger_schema(&conn).unwrap();
        ensure_ledger_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [ROUTE_CARDS_TABLE],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn select_columns_wraps_record_columns() {
        let columns = select_columns();
        assert!(columns.starts_with("id, cluster_number"));
        assert!(columns.ends_with("control_notes, created_at"));
    }
}
