//! Core domain logic for the ABC Company employee record manager.
//! This crate is the single source of truth for storage and business rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::employee::{
    derive_email, Employee, EmployeeId, EmployeeValidationError, NewEmployee,
};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SchemaStatus, SqliteEmployeeRepository,
};
pub use service::employee_service::EmployeeService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
