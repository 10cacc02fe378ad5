//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the student data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Absence (missing id) is reported as `None`/`false`, never as an error.
//! - Store failures are surfaced as `RepoError`, never swallowed.

pub mod student_repo;
