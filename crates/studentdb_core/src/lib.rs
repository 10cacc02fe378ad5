//! Core domain logic for studentdb.
//! This crate owns the student table, its record shapes and the CRUD service.

pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbConfig, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::student::{Student, StudentDto, StudentId};
pub use repo::student_repo::{
    RepoError, RepoResult, SaveOutcome, SqliteStudentRepository, StudentRepository,
};
pub use service::observer::{LoggingObserver, StudentEvent, StudentObserver};
pub use service::student_service::StudentService;
