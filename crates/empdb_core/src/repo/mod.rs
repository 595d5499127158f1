//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the Record Store contract for the employee table.
//! - Isolate SQLite query details from service/shell orchestration.
//!
//! # Invariants
//! - Write paths validate records before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors; store failures are never swallowed.

pub mod employee_repo;
