//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `students` table.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Every operation opens its own connection and drops it before returning,
//!   on success and on error.
//! - Insert and generated-id lookup run on the same connection, back to back.
//! - A failed `save` leaves the caller's record untouched.

use crate::db::{ensure_schema, open_connection, DbConfig, DbError};
use crate::model::student::{Student, StudentId};
use log::{error, info};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Connectivity or SQL execution failure.
    Db(DbError),
    /// Another row already uses this email.
    DuplicateEmail(String),
    /// A NOT NULL / CHECK constraint rejected the record.
    ConstraintViolation(String),
    /// Update requested for a record that was never persisted.
    MissingId,
    /// Create requested for a record that already carries an id.
    AlreadyPersisted(StudentId),
    /// `save` reported an outcome that does not fit the requested write.
    UnexpectedSaveOutcome(SaveOutcome),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already in use: {email}"),
            Self::ConstraintViolation(message) => {
                write!(f, "student record rejected by store: {message}")
            }
            Self::MissingId => write!(f, "student record has no id"),
            Self::AlreadyPersisted(id) => write!(f, "student record already persisted: {id}"),
            Self::UnexpectedSaveOutcome(outcome) => {
                write!(f, "unexpected save outcome: {outcome:?}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateEmail(_)
            | Self::ConstraintViolation(_)
            | Self::MissingId
            | Self::AlreadyPersisted(_)
            | Self::UnexpectedSaveOutcome(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of `StudentRepository::save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New row inserted with this generated id.
    Inserted(StudentId),
    /// Existing row updated.
    Updated,
    /// No row has the record's id; nothing was written.
    Unmatched,
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    fn ensure_schema(&self) -> RepoResult<()>;
    fn find_all(&self) -> RepoResult<Vec<Student>>;
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Inserts when `student.id` is `None` (and writes the generated id
    /// back), otherwise updates the row with that id.
    fn save(&self, student: &mut Student) -> RepoResult<SaveOutcome>;
    fn delete_by_id(&self, id: StudentId) -> RepoResult<bool>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository {
    config: DbConfig,
    // Keeps a shared-cache memory database alive between per-call
    // connections. Always `None` for file databases.
    _anchor: Option<Connection>,
}

impl SqliteStudentRepository {
    /// Opens the repository and makes sure the `students` table exists.
    ///
    /// # Errors
    /// - Returns `RepoError::Db` when the database is unreachable or the
    ///   schema cannot be created. Callers should treat this as fatal.
    pub fn open(config: DbConfig) -> RepoResult<Self> {
        let anchor = if config.is_memory() {
            Some(open_connection(&config)?)
        } else {
            None
        };
        let repo = Self {
            config,
            _anchor: anchor,
        };

        if let Err(err) = repo.ensure_schema() {
            error!(
                "event=repo_open module=repo status=error error_code=schema_bootstrap_failed error={}",
                err
            );
            return Err(err);
        }

        info!(
            "event=repo_open module=repo status=ok mode={}",
            if repo.config.is_memory() { "memory" } else { "file" }
        );
        Ok(repo)
    }

    /// Returns the configuration this repository was opened with.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn connect(&self) -> RepoResult<Connection> {
        Ok(open_connection(&self.config)?)
    }
}

impl StudentRepository for SqliteStudentRepository {
    fn ensure_schema(&self) -> RepoResult<()> {
        let conn = self.connect()?;
        ensure_schema(&conn)?;
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Student>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, student: &mut Student) -> RepoResult<SaveOutcome> {
        let conn = self.connect()?;

        let Some(id) = student.id else {
            conn.execute(
                "INSERT INTO students (first_name, last_name, email) VALUES (?1, ?2, ?3);",
                params![
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                    student.email.as_str(),
                ],
            )
            .map_err(|err| classify_write_error(err, &student.email))?;

            let generated = conn.last_insert_rowid();
            student.id = Some(generated);
            return Ok(SaveOutcome::Inserted(generated));
        };

        let changed = conn
            .execute(
                "UPDATE students
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    email = ?3
                 WHERE id = ?4;",
                params![
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                    student.email.as_str(),
                    id,
                ],
            )
            .map_err(|err| classify_write_error(err, &student.email))?;

        if changed == 0 {
            return Ok(SaveOutcome::Unmatched);
        }

        Ok(SaveOutcome::Updated)
    }

    fn delete_by_id(&self, id: StudentId) -> RepoResult<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM students WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    Ok(Student {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

fn classify_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                return RepoError::DuplicateEmail(email.to_string());
            }
            return RepoError::ConstraintViolation(
                message.clone().unwrap_or_else(|| failure.to_string()),
            );
        }
    }
    err.into()
}
