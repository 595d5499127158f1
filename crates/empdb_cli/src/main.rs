//! Interactive shell entry point for the ABC Company employee database.
//!
//! # Responsibility
//! - Open the local store file, wire the service, and enter the main menu.
//! - Keep startup the only fatal path; menu errors are reported in-session.

mod console;
mod menu;

use empdb_core::db::open_db;
use empdb_core::{default_log_level, init_logging, EmployeeService, SqliteEmployeeRepository};
use menu::Shell;
use std::io;

const DB_FILE: &str = "employees.db";

fn main() {
    if let Err(err) = run() {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Logging is best-effort; an unwritable log directory must not block an
    // interactive session.
    let log_dir = std::env::temp_dir().join("empdb-logs");
    if let Some(dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let conn = open_db(DB_FILE)?;
    let service = EmployeeService::new(SqliteEmployeeRepository::new(&conn));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(service, stdin.lock(), stdout.lock());
    shell.run()?;
    Ok(())
}
