//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for shell callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{derive_email, Employee, EmployeeId, NewEmployee};
use crate::repo::employee_repo::{EmployeeRepository, RepoResult, SchemaStatus};
use log::info;

/// Use-case service wrapper for employee CRUD operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ensures the employee table exists, reporting whether it was created.
    pub fn create_table(&self) -> RepoResult<SchemaStatus> {
        let status = self.repo.create_table()?;
        info!(
            "event=create_table module=service status=ok outcome={}",
            match status {
                SchemaStatus::Created => "created",
                SchemaStatus::AlreadyExists => "already_exists",
            }
        );
        Ok(status)
    }

    /// Hires a new employee.
    ///
    /// # Contract
    /// - The email is derived from first/last at this point, exactly once.
    /// - The returned record carries the store-assigned id.
    pub fn hire(&self, new: &NewEmployee) -> RepoResult<Employee> {
        let employee = self.repo.insert(new)?;
        info!(
            "event=hire module=service status=ok id={}",
            employee.id
        );
        Ok(employee)
    }

    /// Gets one employee by store-assigned id.
    pub fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.find_by_id(id)
    }

    /// Lists all employees with the given surname, in storage order.
    pub fn find_by_last_name(&self, last: &str) -> RepoResult<Vec<Employee>> {
        self.repo.find_by_last_name(last)
    }

    /// Lists all employees earning exactly the given salary.
    pub fn find_by_salary(&self, salary: i64) -> RepoResult<Vec<Employee>> {
        self.repo.find_by_salary(salary)
    }

    /// Looks up the stored email address for an id.
    pub fn email_for_id(&self, id: EmployeeId) -> RepoResult<Option<String>> {
        self.repo.email_for_id(id)
    }

    /// Overwrites the first name; the stored email is left untouched.
    pub fn update_first_name(&self, id: EmployeeId, first: &str) -> RepoResult<()> {
        self.repo.update_first_name(id, first)
    }

    /// Overwrites the surname; the stored email is left untouched.
    pub fn update_last_name(&self, id: EmployeeId, last: &str) -> RepoResult<()> {
        self.repo.update_last_name(id, last)
    }

    /// Overwrites the salary.
    pub fn update_salary(&self, id: EmployeeId, salary: i64) -> RepoResult<()> {
        self.repo.update_salary(id, salary)
    }

    /// Overwrites the email with an address derived from new name parts.
    ///
    /// This is the only path that rewrites a stored email; it applies the
    /// same derivation rule as hiring.
    pub fn update_email_from_names(
        &self,
        id: EmployeeId,
        first: &str,
        last: &str,
    ) -> RepoResult<()> {
        self.repo.update_email(id, &derive_email(first, last))
    }

    /// Removes an employee record; `false` means the id was absent.
    pub fn remove(&self, id: EmployeeId) -> RepoResult<bool> {
        let removed = self.repo.delete(id)?;
        info!(
            "event=remove module=service status=ok id={id} removed={removed}"
        );
        Ok(removed)
    }

    /// Full scan of the employee table in storage order.
    pub fn list_all(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_all()
    }
}
