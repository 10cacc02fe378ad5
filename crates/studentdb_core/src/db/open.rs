//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or shared-cache in-memory SQLite connections from `DbConfig`.
//! - Configure connection settings required by core behavior.
//!
//! # Invariants
//! - Callers own the returned connection and drop it when their operation
//!   ends; nothing here caches connections.

use super::{DbConfig, DbError, DbResult};
use log::{debug, error};
use rusqlite::{Connection, OpenFlags};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens one connection for the configured database.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - Returns `DbError::Open` when the database cannot be reached.
/// - Returns `DbError::Sqlite` when connection setup fails.
pub fn open_connection(config: &DbConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = config.mode();
    let target = config.target();

    let opened = match config {
        // No SQLITE_OPEN_URI: a path that happens to start with `file:` is
        // still a plain file name.
        DbConfig::File(path) => Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        ),
        DbConfig::Memory { .. } => Connection::open(target.as_str()),
    };

    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Open {
                target,
                source: err,
            });
        }
    };

    if let Err(err) = conn.busy_timeout(BUSY_TIMEOUT) {
        error!(
            "event=db_open module=db status=error mode={} duration_ms={} error_code=db_configure_failed error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.into());
    }

    debug!(
        "event=db_open module=db status=ok mode={} duration_ms={}",
        mode,
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}
