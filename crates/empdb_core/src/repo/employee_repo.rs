//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the single `employees` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `insert` derives the email from first/last before writing; no other
//!   write path touches the email implicitly.
//! - Ids are assigned by the store (`INTEGER PRIMARY KEY` rowid), never by
//!   callers.
//! - Read paths reject malformed persisted state instead of masking it.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    title,
    first,
    last,
    email,
    salary
FROM employees";

const CREATE_TABLE_SQL: &str = "CREATE TABLE employees (
    id     INTEGER PRIMARY KEY,
    title  TEXT NOT NULL,
    first  TEXT NOT NULL,
    last   TEXT NOT NULL,
    email  TEXT NOT NULL,
    salary INTEGER NOT NULL
);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Outcome of a `create_table` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The table did not exist and was created.
    Created,
    /// The table was already present; nothing was touched.
    AlreadyExists,
}

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    NotFound(EmployeeId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record Store interface for the employee table.
pub trait EmployeeRepository {
    /// Creates the employee table if absent; never destructive.
    fn create_table(&self) -> RepoResult<SchemaStatus>;
    /// Inserts a new record, deriving its email and store-assigned id.
    fn insert(&self, new: &NewEmployee) -> RepoResult<Employee>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Exact-match lookup on surname, in storage (id) order.
    fn find_by_last_name(&self, last: &str) -> RepoResult<Vec<Employee>>;
    /// Exact-match lookup on salary, in storage (id) order.
    fn find_by_salary(&self, salary: i64) -> RepoResult<Vec<Employee>>;
    /// Single-column projection of the stored email address.
    fn email_for_id(&self, id: EmployeeId) -> RepoResult<Option<String>>;
    /// Field-level overwrite; does not recompute the stored email.
    fn update_first_name(&self, id: EmployeeId, first: &str) -> RepoResult<()>;
    /// Field-level overwrite; does not recompute the stored email.
    fn update_last_name(&self, id: EmployeeId, last: &str) -> RepoResult<()>;
    fn update_salary(&self, id: EmployeeId, salary: i64) -> RepoResult<()>;
    fn update_email(&self, id: EmployeeId, email: &str) -> RepoResult<()>;
    /// Removes the row if present; returns whether a row was removed.
    fn delete(&self, id: EmployeeId) -> RepoResult<bool>;
    /// Full scan in storage (id) order.
    fn list_all(&self) -> RepoResult<Vec<Employee>>;
}

/// SQLite-backed employee repository holding a borrowed connection.
///
/// The connection is owned by the caller and passed in explicitly, so the
/// store has no process-wide state.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn table_exists(&self) -> RepoResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'employees';",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_table(&self) -> RepoResult<SchemaStatus> {
        if self.table_exists()? {
            return Ok(SchemaStatus::AlreadyExists);
        }
        self.conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(SchemaStatus::Created)
    }

    fn insert(&self, new: &NewEmployee) -> RepoResult<Employee> {
        new.validate()?;
        let email = new.derived_email();

        self.conn.execute(
            "INSERT INTO employees (title, first, last, email, salary)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                new.title.as_str(),
                new.first.as_str(),
                new.last.as_str(),
                email.as_str(),
                new.salary,
            ],
        )?;

        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            title: new.title.clone(),
            first: new.first.clone(),
            last: new.last.clone(),
            email,
            salary: new.salary,
        })
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn find_by_last_name(&self, last: &str) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} WHERE last = ?1 ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![last])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_salary(&self, salary: i64) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} WHERE salary = ?1 ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![salary])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn email_for_id(&self, id: EmployeeId) -> RepoResult<Option<String>> {
        let email = self
            .conn
            .query_row(
                "SELECT email FROM employees WHERE id = ?1;",
                params![id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(email)
    }

    fn update_first_name(&self, id: EmployeeId, first: &str) -> RepoResult<()> {
        if first.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("first").into());
        }
        overwrite_field(id, "first", |stmt_sql| {
            self.conn.execute(stmt_sql, params![first, id])
        })
    }

    fn update_last_name(&self, id: EmployeeId, last: &str) -> RepoResult<()> {
        if last.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("last").into());
        }
        overwrite_field(id, "last", |stmt_sql| {
            self.conn.execute(stmt_sql, params![last, id])
        })
    }

    fn update_salary(&self, id: EmployeeId, salary: i64) -> RepoResult<()> {
        overwrite_field(id, "salary", |stmt_sql| {
            self.conn.execute(stmt_sql, params![salary, id])
        })
    }

    fn update_email(&self, id: EmployeeId, email: &str) -> RepoResult<()> {
        if email.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyField("email").into());
        }
        overwrite_field(id, "email", |stmt_sql| {
            self.conn.execute(stmt_sql, params![email, id])
        })
    }

    fn delete(&self, id: EmployeeId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }

    fn list_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }
}

// Column names are compile-time constants from this module, never user input.
fn overwrite_field<F>(id: EmployeeId, column: &'static str, exec: F) -> RepoResult<()>
where
    F: FnOnce(&str) -> Result<usize, rusqlite::Error>,
{
    let sql = format!("UPDATE employees SET {column} = ?1 WHERE id = ?2;");
    let changed = exec(&sql)?;
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        id: row.get("id")?,
        title: row.get("title")?,
        first: row.get("first")?,
        last: row.get("last")?,
        email: row.get("email")?,
        salary: row.get("salary")?,
    };
    employee
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(employee)
}
