//! Domain model for employee records.
//!
//! # Responsibility
//! - Define the canonical record shape persisted in the store.
//! - Own the derived-email rule applied at hire time.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `EmployeeId`.
//! - `email` is derived exactly once, at creation; later name updates never
//!   recompute it.

pub mod employee;
