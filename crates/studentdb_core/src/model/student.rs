//! Student record shapes.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changed afterwards.
//! - Field constraints (non-empty, max length, unique email) are enforced by
//!   the store, not here.

use serde::{Deserialize, Serialize};

/// Store-generated identifier of a student row.
pub type StudentId = i64;

/// Persistence-facing student record, as read from and written to the
/// `students` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Student {
    /// Creates a record that has not been persisted yet.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Creates a record for an existing row.
    pub fn with_id(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(first_name, last_name, email)
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Transfer-facing student record handed to UI callers.
///
/// Structurally identical to `Student` so the UI and storage layers can
/// change independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl StudentDto {
    /// Creates a transfer record that has not been persisted yet.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Creates a transfer record for an existing row.
    pub fn with_id(
        id: StudentId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(first_name, last_name, email)
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Full display name, `first last`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
