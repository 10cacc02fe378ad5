//! Student record shapes.
//!
//! # Responsibility
//! - Define the persistence-facing (`Student`) and transfer-facing
//!   (`StudentDto`) records.
//!
//! # Invariants
//! - `id == None` means the record was never persisted.
//! - Both shapes carry the same four fields; conversion lives in `mapper`.

pub mod student;
