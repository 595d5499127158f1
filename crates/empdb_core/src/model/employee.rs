//! Employee domain model.
//!
//! # Responsibility
//! - Define the persisted employee record and the insert-time input shape.
//! - Derive the company email address from first/last name.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused.
//! - `email` is computed once via `derive_email` and is not recomputed when
//!   names change later; updates to it are explicit.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for an employee record (SQLite rowid).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

const EMAIL_DOMAIN: &str = "abccompany.com";

/// A persisted employee record, exactly one row in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned primary key.
    pub id: EmployeeId,
    /// Salutation, e.g. `Mr`, `Mrs`, `Prof`.
    pub title: String,
    pub first: String,
    pub last: String,
    /// Derived at creation from `first`/`last`; never auto-recomputed.
    pub email: String,
    pub salary: i64,
}

/// Input shape for hiring a new employee.
///
/// Carries no `id` (store-assigned) and no `email` (derived on insert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub title: String,
    pub first: String,
    pub last: String,
    pub salary: i64,
}

/// Validation failure for employee write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// The named field was empty or whitespace-only.
    EmptyField(&'static str),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "employee field `{field}` must not be empty"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Derives the company email address from first/last name.
///
/// # Contract
/// - `lowercase(first) + "." + lowercase(last) + "@abccompany.com"`.
/// - Applied exactly once, when a record is created.
pub fn derive_email(first: &str, last: &str) -> String {
    format!(
        "{}.{}@{EMAIL_DOMAIN}",
        first.to_lowercase(),
        last.to_lowercase()
    )
}

impl NewEmployee {
    /// Checks the NOT NULL-equivalent field constraints.
    ///
    /// # Invariants
    /// - `title`, `first` and `last` must contain non-whitespace text.
    /// - `salary` is intentionally unconstrained beyond its integer type.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        validate_fields(&self.title, &self.first, &self.last)
    }

    /// The email this employee will receive when inserted.
    pub fn derived_email(&self) -> String {
        derive_email(&self.first, &self.last)
    }
}

impl Employee {
    /// Checks the NOT NULL-equivalent field constraints on a full record.
    ///
    /// Read paths use this to reject malformed persisted state instead of
    /// masking it.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        validate_fields(&self.title, &self.first, &self.last)?;
        if self.email.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("email"));
        }
        Ok(())
    }
}

fn validate_fields(
    title: &str,
    first: &str,
    last: &str,
) -> Result<(), EmployeeValidationError> {
    if title.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyField("title"));
    }
    if first.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyField("first"));
    }
    if last.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyField("last"));
    }
    Ok(())
}
