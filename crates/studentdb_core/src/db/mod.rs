//! SQLite storage configuration and schema bootstrap entry points.
//!
//! # Responsibility
//! - Describe where the student table lives (`DbConfig`).
//! - Open short-lived SQLite connections for one store operation each.
//! - Create the `students` table when it does not exist yet.
//!
//! # Invariants
//! - Connection settings are passed in explicitly; nothing is read from
//!   hidden globals.
//! - Core code must not read/write student rows before `ensure_schema`
//!   succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

mod open;
pub mod schema;

pub use open::open_connection;
pub use schema::ensure_schema;

pub type DbResult<T> = Result<T, DbError>;

static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Location of the student database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    /// SQLite database file on disk.
    File(PathBuf),
    /// Named shared-cache in-memory database.
    ///
    /// The database lives only as long as at least one connection to it
    /// stays open.
    Memory { name: String },
}

impl DbConfig {
    /// File-backed configuration.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// In-memory configuration with a process-unique name.
    ///
    /// Two calls never share data, which keeps tests isolated.
    pub fn in_memory() -> Self {
        let seq = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
        Self::Memory {
            name: format!("studentdb-{}-{seq}", std::process::id()),
        }
    }

    /// Returns whether this configuration points to an in-memory database.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory { .. })
    }

    /// Human-readable connection target (path or `file:` URI).
    ///
    /// File databases are opened from the `Path` itself, not this string.
    pub fn target(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Memory { name } => format!("file:{name}?mode=memory&cache=shared"),
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory { .. } => "memory",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// The database could not be reached/opened at all.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "failed to open database `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
