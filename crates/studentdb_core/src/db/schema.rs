//! Student table schema bootstrap.
//!
//! # Invariants
//! - `ensure_schema` is idempotent (`CREATE TABLE IF NOT EXISTS`).
//! - `id` uses `AUTOINCREMENT`, so deleted ids are never handed out again.

use super::DbResult;
use log::info;
use rusqlite::Connection;

/// Maximum length of every text column.
pub const MAX_FIELD_CHARS: usize = 100;

// Blank means empty after stripping spaces, tabs, CR and LF.
const STUDENTS_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS students (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(100) NOT NULL
        CHECK (length(trim(first_name, ' ' || char(9) || char(10) || char(13))) > 0 AND length(first_name) <= 100),
    last_name  VARCHAR(100) NOT NULL
        CHECK (length(trim(last_name, ' ' || char(9) || char(10) || char(13))) > 0 AND length(last_name) <= 100),
    email      VARCHAR(100) NOT NULL UNIQUE
        CHECK (length(trim(email, ' ' || char(9) || char(10) || char(13))) > 0 AND length(email) <= 100)
);";

/// Creates the `students` table when it is missing.
///
/// Safe to call any number of times.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(STUDENTS_SCHEMA_SQL)?;
    info!("event=schema_ensure module=db status=ok table=students");
    Ok(())
}

/// Returns whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
