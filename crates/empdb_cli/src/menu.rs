//! Interactive menu shell over the employee service.
//!
//! # Responsibility
//! - Drive the main/search/update menu hierarchy as an explicit state loop.
//! - Collect console input, call the service, print formatted results.
//!
//! # Invariants
//! - Menu navigation is a flat loop over `MenuState`; no menu calls another
//!   menu recursively, so session length never grows the call stack.
//! - Invalid selections and malformed numbers never mutate the store.
//! - End of input ends the session cleanly; nothing else does.

use crate::console::Console;
use empdb_core::{
    Employee, EmployeeRepository, EmployeeService, NewEmployee, RepoError, SchemaStatus,
};
use log::error;
use std::io::{self, BufRead, Write};

/// The three menus of the shell. `Main` is both initial and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    Main,
    Search,
    Update,
}

/// Where the loop goes after one menu pass.
enum Flow {
    Goto(MenuState),
    Exit,
}

/// Outcome of resolving a target record by id.
enum Resolution {
    Found(Employee),
    Missing,
    /// Bad input or store error; a message has already been printed.
    Aborted,
    Eof,
}

/// Which column an update action overwrites.
#[derive(Clone, Copy)]
enum UpdateField {
    FirstName,
    Surname,
    Salary,
    Email,
}

/// Blocking menu shell bound to a service and a console.
pub struct Shell<R: EmployeeRepository, I, O> {
    service: EmployeeService<R>,
    console: Console<I, O>,
}

impl<R: EmployeeRepository, I: BufRead, O: Write> Shell<R, I, O> {
    pub fn new(service: EmployeeService<R>, input: I, output: O) -> Self {
        Self {
            service,
            console: Console::new(input, output),
        }
    }

    /// Runs the menu loop until the input stream ends.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::Main;
        loop {
            let flow = match state {
                MenuState::Main => self.main_menu()?,
                MenuState::Search => self.search_menu()?,
                MenuState::Update => self.update_menu()?,
            };
            match flow {
                Flow::Goto(next) => state = next,
                Flow::Exit => return Ok(()),
            }
        }
    }

    #[cfg(test)]
    fn into_output(self) -> O {
        self.console.into_output()
    }

    fn main_menu(&mut self) -> io::Result<Flow> {
        self.console.blank()?;
        let Some(_) = self
            .console
            .prompt("Press enter to continue to the main menu: ")?
        else {
            return Ok(Flow::Exit);
        };

        self.console.line("\nWelcome to the ABC Company database menu")?;
        self.console.line("Please choose from the following options:")?;
        self.console.line("1 - Create the employee table")?;
        self.console.line("2 - Insert a new employee")?;
        self.console.line("3 - Remove an existing employee")?;
        self.console.line("4 - Update an employee's details")?;
        self.console.line("5 - Search the database")?;
        self.console
            .line("6 - Display the entire employee database")?;

        let Some(choice) = self.console.prompt("\nEnter your selection: ")? else {
            return Ok(Flow::Exit);
        };
        match choice.as_str() {
            "1" => self.create_table_action(),
            "2" => self.insert_action(),
            "3" => self.remove_action(),
            "4" => Ok(Flow::Goto(MenuState::Update)),
            "5" => Ok(Flow::Goto(MenuState::Search)),
            "6" => self.display_all_action(MenuState::Main),
            _ => {
                self.console.line("\n***Incorrect selection***")?;
                Ok(Flow::Goto(MenuState::Main))
            }
        }
    }

    fn search_menu(&mut self) -> io::Result<Flow> {
        self.console.blank()?;
        let Some(_) = self
            .console
            .prompt("Press enter to continue to the search menu: ")?
        else {
            return Ok(Flow::Exit);
        };

        self.console.line("\nHow would you like to search?")?;
        self.console.line("1 - By employee ID")?;
        self.console.line("2 - By employee surname")?;
        self.console.line("3 - By salary")?;
        self.console.line("4 - Display the whole database")?;
        self.console
            .line("5 - Get an email address from an employee ID")?;
        self.console.line("6 - Return to the main menu")?;

        let Some(choice) = self.console.prompt("\nEnter your selection: ")? else {
            return Ok(Flow::Exit);
        };
        match choice.as_str() {
            "1" => self.search_by_id_action(),
            "2" => self.search_by_surname_action(),
            "3" => self.search_by_salary_action(),
            "4" => self.display_all_action(MenuState::Search),
            "5" => self.email_for_id_action(),
            "6" => Ok(Flow::Goto(MenuState::Main)),
            _ => {
                self.console.line("\n***Incorrect selection***")?;
                Ok(Flow::Goto(MenuState::Search))
            }
        }
    }

    fn update_menu(&mut self) -> io::Result<Flow> {
        self.console.blank()?;
        let Some(_) = self
            .console
            .prompt("Press enter to continue to the update menu: ")?
        else {
            return Ok(Flow::Exit);
        };

        self.console.line("\nWhat would you like to update?")?;
        self.console
            .line("NOTE: emails will NOT be updated automatically with name changes")?;
        self.console.blank()?;
        self.console.line("1 - Employee first name")?;
        self.console.line("2 - Employee surname")?;
        self.console.line("3 - Employee salary")?;
        self.console.line("4 - Employee email")?;
        self.console.line("5 - Return to the main menu")?;

        let Some(choice) = self.console.prompt("\nEnter your selection: ")? else {
            return Ok(Flow::Exit);
        };
        match choice.as_str() {
            "1" => self.update_field_action(UpdateField::FirstName),
            "2" => self.update_field_action(UpdateField::Surname),
            "3" => self.update_field_action(UpdateField::Salary),
            "4" => self.update_field_action(UpdateField::Email),
            "5" => Ok(Flow::Goto(MenuState::Main)),
            _ => {
                self.console.line("\n***Incorrect selection***")?;
                Ok(Flow::Goto(MenuState::Update))
            }
        }
    }

    fn create_table_action(&mut self) -> io::Result<Flow> {
        match self.service.create_table() {
            Ok(SchemaStatus::Created) => {
                self.console
                    .line("\nThe table 'employees' has been created successfully")?;
            }
            Ok(SchemaStatus::AlreadyExists) => {
                self.console.line("\nThis table is already created")?;
            }
            Err(err) => self.report_store_error("create_table", &err)?,
        }
        Ok(Flow::Goto(MenuState::Main))
    }

    fn insert_action(&mut self) -> io::Result<Flow> {
        self.console
            .line("\nCompany emails and employee IDs are generated automatically")?;

        let Some(first) = self.console.prompt("\nEnter first name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(last) = self.console.prompt("Enter surname: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(title) = self.console.prompt("Enter title (ie: Mr/Mrs/Prof): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(salary_raw) = self.console.prompt("Enter salary: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(salary) = salary_raw.parse::<i64>() else {
            self.console.line("\n***Invalid salary amount***")?;
            return Ok(Flow::Goto(MenuState::Main));
        };

        let new = NewEmployee {
            title,
            first,
            last,
            salary,
        };
        match self.service.hire(&new) {
            Ok(employee) => {
                self.console.line("\nNew employee created successfully")?;
                self.display_employee(&employee)?;
            }
            Err(RepoError::Validation(err)) => {
                self.console.line(&format!("\n***{err}***"))?;
            }
            Err(err) => {
                self.console
                    .line("\n***You must create an employee table first***")?;
                error!("event=insert module=shell status=error error={err}");
            }
        }
        Ok(Flow::Goto(MenuState::Main))
    }

    fn remove_action(&mut self) -> io::Result<Flow> {
        self.console.line(
            "\nYou have chosen to permanently remove an employee's details from the database",
        )?;
        self.console.line("\nWould you like to proceed?")?;
        self.console.line("1 - Yes")?;
        self.console.line("2 - No, return to the main menu")?;

        let Some(choice) = self.console.prompt("\nEnter your selection: ")? else {
            return Ok(Flow::Exit);
        };
        if choice != "1" {
            return Ok(Flow::Goto(MenuState::Main));
        }

        let employee = match self.resolve_by_id()? {
            Resolution::Found(employee) => employee,
            Resolution::Missing | Resolution::Aborted => return Ok(Flow::Goto(MenuState::Main)),
            Resolution::Eof => return Ok(Flow::Exit),
        };

        self.console
            .line("\nIs the above record the correct one to delete?")?;
        self.console.line("1 - Yes")?;
        self.console.line("2 - No, return to the menu")?;

        let Some(confirm) = self.console.prompt("\nEnter your selection: ")? else {
            return Ok(Flow::Exit);
        };
        if confirm != "1" {
            return Ok(Flow::Goto(MenuState::Main));
        }

        match self.service.remove(employee.id) {
            Ok(true) => self.console.line("\nEmployee removed")?,
            // The record vanished between lookup and delete; single-user, so
            // this only happens if the file was touched externally.
            Ok(false) => self
                .console
                .line("\nNo record of this ID number exists")?,
            Err(err) => self.report_store_error("remove", &err)?,
        }
        Ok(Flow::Goto(MenuState::Main))
    }

    fn update_field_action(&mut self, field: UpdateField) -> io::Result<Flow> {
        let employee = match self.resolve_by_id()? {
            Resolution::Found(employee) => employee,
            Resolution::Missing | Resolution::Aborted => return Ok(Flow::Goto(MenuState::Update)),
            Resolution::Eof => return Ok(Flow::Exit),
        };
        let id = employee.id;

        let outcome = match field {
            UpdateField::FirstName => {
                let Some(first) = self.console.prompt("\nEnter the updated first name: ")? else {
                    return Ok(Flow::Exit);
                };
                self.service.update_first_name(id, &first)
            }
            UpdateField::Surname => {
                let Some(last) = self.console.prompt("\nEnter the updated surname: ")? else {
                    return Ok(Flow::Exit);
                };
                self.service.update_last_name(id, &last)
            }
            UpdateField::Salary => {
                let Some(raw) = self.console.prompt("\nEnter the updated salary: ")? else {
                    return Ok(Flow::Exit);
                };
                let Ok(salary) = raw.parse::<i64>() else {
                    self.console.line("\n***Invalid salary amount***")?;
                    return Ok(Flow::Goto(MenuState::Update));
                };
                self.service.update_salary(id, salary)
            }
            UpdateField::Email => {
                self.console.line(
                    "\nCompany emails are of the form 'firstname.surname@abccompany.com'",
                )?;
                let Some(first) = self.console.prompt("\nEnter the new email first name: ")?
                else {
                    return Ok(Flow::Exit);
                };
                let Some(last) = self.console.prompt("Enter the new email surname: ")? else {
                    return Ok(Flow::Exit);
                };
                self.service.update_email_from_names(id, &first, &last)
            }
        };

        match outcome {
            Ok(()) => {
                self.console.line("\nUpdate successful:")?;
                match self.service.find_by_id(id) {
                    Ok(Some(updated)) => self.display_employee(&updated)?,
                    Ok(None) => {}
                    Err(err) => self.report_store_error("find_by_id", &err)?,
                }
            }
            Err(RepoError::Validation(err)) => {
                self.console.line(&format!("\n***{err}***"))?;
            }
            Err(RepoError::NotFound(_)) => {
                self.console.line("\nNo record of this ID number exists")?;
            }
            Err(err) => self.report_store_error("update", &err)?,
        }
        Ok(Flow::Goto(MenuState::Update))
    }

    fn search_by_id_action(&mut self) -> io::Result<Flow> {
        match self.resolve_by_id()? {
            Resolution::Eof => Ok(Flow::Exit),
            _ => Ok(Flow::Goto(MenuState::Search)),
        }
    }

    fn search_by_surname_action(&mut self) -> io::Result<Flow> {
        let Some(last) = self.console.prompt("\nEnter employee surname: ")? else {
            return Ok(Flow::Exit);
        };
        match self.service.find_by_last_name(&last) {
            Ok(matches) if matches.is_empty() => {
                self.console.line("\nNo record of this surname exists")?;
            }
            Ok(matches) => {
                for employee in &matches {
                    self.display_employee(employee)?;
                }
            }
            Err(err) => self.report_store_error("find_by_last_name", &err)?,
        }
        Ok(Flow::Goto(MenuState::Search))
    }

    fn search_by_salary_action(&mut self) -> io::Result<Flow> {
        let Some(raw) = self.console.prompt("\nEnter salary: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(salary) = raw.parse::<i64>() else {
            self.console.line("\n***Invalid salary amount***")?;
            return Ok(Flow::Goto(MenuState::Search));
        };
        match self.service.find_by_salary(salary) {
            Ok(matches) if matches.is_empty() => {
                self.console
                    .line("\nNo record of this salary level exists")?;
            }
            Ok(matches) => {
                for employee in &matches {
                    self.display_employee(employee)?;
                }
            }
            Err(err) => self.report_store_error("find_by_salary", &err)?,
        }
        Ok(Flow::Goto(MenuState::Search))
    }

    fn email_for_id_action(&mut self) -> io::Result<Flow> {
        let Some(raw) = self.console.prompt("\nEnter employee ID number: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(id) = raw.parse::<i64>() else {
            self.console.line("\n***Invalid ID number***")?;
            return Ok(Flow::Goto(MenuState::Search));
        };
        match self.service.email_for_id(id) {
            Ok(Some(email)) => {
                self.console.line(&format!("\nEmployee email: {email}"))?;
            }
            Ok(None) => {
                self.console.line("\nNo record of this ID number exists")?;
            }
            Err(err) => self.report_store_error("email_for_id", &err)?,
        }
        Ok(Flow::Goto(MenuState::Search))
    }

    fn display_all_action(&mut self, parent: MenuState) -> io::Result<Flow> {
        match self.service.list_all() {
            Ok(employees) => {
                self.console.line("\nemployees:")?;
                for employee in &employees {
                    self.display_employee(employee)?;
                }
            }
            Err(err) => self.report_store_error("list_all", &err)?,
        }
        Ok(Flow::Goto(parent))
    }

    /// Reads an id, looks the record up, and displays it when found.
    fn resolve_by_id(&mut self) -> io::Result<Resolution> {
        let Some(raw) = self.console.prompt("\nEnter employee ID number: ")? else {
            return Ok(Resolution::Eof);
        };
        let Ok(id) = raw.parse::<i64>() else {
            self.console.line("\n***Invalid ID number***")?;
            return Ok(Resolution::Aborted);
        };
        match self.service.find_by_id(id) {
            Ok(Some(employee)) => {
                self.display_employee(&employee)?;
                Ok(Resolution::Found(employee))
            }
            Ok(None) => {
                self.console.line("\nNo record of this ID number exists")?;
                Ok(Resolution::Missing)
            }
            Err(err) => {
                self.report_store_error("find_by_id", &err)?;
                Ok(Resolution::Aborted)
            }
        }
    }

    fn display_employee(&mut self, employee: &Employee) -> io::Result<()> {
        self.console
            .line(&format!("\nEmployee ID: {}", employee.id))?;
        self.console
            .line(&format!("Employee Title: {}", employee.title))?;
        self.console
            .line(&format!("Employee Name: {}", employee.first))?;
        self.console
            .line(&format!("Employee Surname: {}", employee.last))?;
        self.console
            .line(&format!("Employee Email: {}", employee.email))?;
        self.console
            .line(&format!("Employee Salary: £{}", employee.salary))?;
        Ok(())
    }

    fn report_store_error(&mut self, operation: &str, err: &RepoError) -> io::Result<()> {
        error!("event={operation} module=shell status=error error={err}");
        self.console.line(&format!("\n***Database error: {err}***"))
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use empdb_core::db::open_db_in_memory;
    use empdb_core::{
        EmployeeRepository, EmployeeService, NewEmployee, SqliteEmployeeRepository,
    };
    use rusqlite::Connection;
    use std::io::Cursor;

    fn run_script(conn: &Connection, script: &str) -> String {
        let service = EmployeeService::new(SqliteEmployeeRepository::new(conn));
        let mut shell = Shell::new(service, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        shell.run().expect("shell run should not fail");
        String::from_utf8(shell.into_output()).expect("shell output should be UTF-8")
    }

    fn seeded_conn() -> Connection {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let repo = SqliteEmployeeRepository::new(&conn);
        repo.create_table().expect("table creation should succeed");
        repo.insert(&NewEmployee {
            title: "Mr".to_string(),
            first: "John".to_string(),
            last: "Smith".to_string(),
            salary: 50_000,
        })
        .expect("seed insert should succeed");
        conn
    }

    #[test]
    fn create_table_then_insert_stores_derived_email() {
        let conn = open_db_in_memory().expect("in-memory db should open");

        let output = run_script(&conn, "\n1\n\n2\nJohn\nSmith\nMr\n50000\n");
        assert!(output.contains("The table 'employees' has been created successfully"));
        assert!(output.contains("New employee created successfully"));
        assert!(output.contains("Employee Email: john.smith@abccompany.com"));

        let repo = SqliteEmployeeRepository::new(&conn);
        let stored = repo
            .find_by_id(1)
            .expect("lookup should succeed")
            .expect("record should exist");
        assert_eq!(stored.email, "john.smith@abccompany.com");
        assert_eq!(stored.salary, 50_000);
    }

    #[test]
    fn insert_without_table_reports_and_does_not_crash() {
        let conn = open_db_in_memory().expect("in-memory db should open");

        let output = run_script(&conn, "\n2\nJane\nDoe\nMrs\n42000\n");
        assert!(output.contains("You must create an employee table first"));
    }

    #[test]
    fn invalid_selection_redisplays_menu_without_side_effects() {
        let conn = open_db_in_memory().expect("in-memory db should open");

        let output = run_script(&conn, "\nx\n");
        assert!(output.contains("***Incorrect selection***"));

        // No action ran, so the table was never created.
        let repo = SqliteEmployeeRepository::new(&conn);
        assert!(repo.find_by_id(1).is_err());
    }

    #[test]
    fn remove_flow_requires_confirmation_and_deletes() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n3\n1\n1\n1\n");
        assert!(output.contains("Is the above record the correct one to delete?"));
        assert!(output.contains("Employee removed"));

        let repo = SqliteEmployeeRepository::new(&conn);
        assert!(repo
            .find_by_id(1)
            .expect("lookup should succeed")
            .is_none());
    }

    #[test]
    fn declining_removal_leaves_record_intact() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n3\n1\n1\n2\n");
        assert!(!output.contains("Employee removed"));

        let repo = SqliteEmployeeRepository::new(&conn);
        assert!(repo
            .find_by_id(1)
            .expect("lookup should succeed")
            .is_some());
    }

    #[test]
    fn update_salary_flow_changes_salary_but_not_email() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n4\n\n3\n1\n55000\n");
        assert!(output.contains("Update successful:"));
        assert!(output.contains("Employee Salary: £55000"));

        let repo = SqliteEmployeeRepository::new(&conn);
        let stored = repo
            .find_by_id(1)
            .expect("lookup should succeed")
            .expect("record should exist");
        assert_eq!(stored.salary, 55_000);
        assert_eq!(stored.email, "john.smith@abccompany.com");
    }

    #[test]
    fn update_surname_flow_does_not_touch_email() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n4\n\n2\n1\nJones\n");
        assert!(output.contains("Employee Surname: Jones"));
        assert!(output.contains("Employee Email: john.smith@abccompany.com"));
    }

    #[test]
    fn search_by_surname_lists_all_matches_only() {
        let conn = seeded_conn();
        let repo = SqliteEmployeeRepository::new(&conn);
        repo.insert(&NewEmployee {
            title: "Mrs".to_string(),
            first: "Anna".to_string(),
            last: "Smith".to_string(),
            salary: 61_000,
        })
        .expect("insert should succeed");
        repo.insert(&NewEmployee {
            title: "Dr".to_string(),
            first: "Omar".to_string(),
            last: "Khan".to_string(),
            salary: 70_000,
        })
        .expect("insert should succeed");

        let output = run_script(&conn, "\n5\n\n2\nSmith\n");
        assert!(output.contains("Employee Name: John"));
        assert!(output.contains("Employee Name: Anna"));
        assert!(!output.contains("Employee Name: Omar"));
    }

    #[test]
    fn email_lookup_prints_stored_address() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n5\n\n5\n1\n");
        assert!(output.contains("Employee email: john.smith@abccompany.com"));
    }

    #[test]
    fn malformed_id_aborts_without_mutation() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n3\n1\nnot-a-number\n");
        assert!(output.contains("***Invalid ID number***"));

        let repo = SqliteEmployeeRepository::new(&conn);
        assert!(repo
            .find_by_id(1)
            .expect("lookup should succeed")
            .is_some());
    }

    #[test]
    fn update_menu_states_email_policy() {
        let conn = seeded_conn();

        let output = run_script(&conn, "\n4\n\n5\n");
        assert!(output.contains("emails will NOT be updated automatically"));
    }
}
