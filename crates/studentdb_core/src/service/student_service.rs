//! Student use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points UI code calls.
//! - Hide the persistence/transfer record split behind `StudentDto`.
//!
//! # Invariants
//! - Every call performs exactly one repository round trip; no retries, no
//!   caching.
//! - Repository errors are returned unchanged.
//! - Observers are notified only after a mutation actually happened.

use crate::mapper::{to_dto, to_entity};
use crate::model::student::{StudentDto, StudentId};
use crate::repo::student_repo::{RepoError, RepoResult, SaveOutcome, StudentRepository};
use crate::service::observer::{StudentEvent, StudentObserver};

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
    observer: Option<Box<dyn StudentObserver>>,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            observer: None,
        }
    }

    /// Installs an observer for state-change events.
    pub fn with_observer(mut self, observer: impl StudentObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Lists all students in store order.
    pub fn list_all(&self) -> RepoResult<Vec<StudentDto>> {
        Ok(self
            .repo
            .find_all()?
            .into_iter()
            .map(StudentDto::from)
            .collect())
    }

    /// Persists a new student and writes the generated id back onto `dto`.
    ///
    /// # Errors
    /// - `RepoError::AlreadyPersisted` when `dto` already has an id.
    /// - `RepoError::DuplicateEmail` / `RepoError::ConstraintViolation` when
    ///   the store rejects the record; `dto` is left unchanged.
    pub fn create(&self, dto: &mut StudentDto) -> RepoResult<StudentId> {
        if let Some(id) = dto.id {
            return Err(RepoError::AlreadyPersisted(id));
        }

        let mut student = to_entity(dto);
        let id = match self.repo.save(&mut student)? {
            SaveOutcome::Inserted(id) => id,
            outcome @ (SaveOutcome::Updated | SaveOutcome::Unmatched) => {
                return Err(RepoError::UnexpectedSaveOutcome(outcome));
            }
        };

        dto.id = Some(id);
        self.notify(StudentEvent::Created { id });
        Ok(id)
    }

    /// Gets one student by id; `Ok(None)` when no row has that id.
    pub fn get_by_id(&self, id: StudentId) -> RepoResult<Option<StudentDto>> {
        Ok(self.repo.find_by_id(id)?.as_ref().map(to_dto))
    }

    /// Updates all fields of an existing student.
    ///
    /// Returns `false` when no row has `dto.id`. Does not re-read the row.
    pub fn update(&self, dto: &StudentDto) -> RepoResult<bool> {
        let Some(id) = dto.id else {
            return Err(RepoError::MissingId);
        };

        let mut student = to_entity(dto);
        let updated = match self.repo.save(&mut student)? {
            SaveOutcome::Updated => true,
            SaveOutcome::Unmatched => false,
            outcome @ SaveOutcome::Inserted(_) => {
                return Err(RepoError::UnexpectedSaveOutcome(outcome));
            }
        };

        if updated {
            self.notify(StudentEvent::Updated { id });
        }
        Ok(updated)
    }

    /// Deletes a student; `false` when no row has that id.
    pub fn delete(&self, id: StudentId) -> RepoResult<bool> {
        let deleted = self.repo.delete_by_id(id)?;
        if deleted {
            self.notify(StudentEvent::Deleted { id });
        }
        Ok(deleted)
    }

    fn notify(&self, event: StudentEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }
}
