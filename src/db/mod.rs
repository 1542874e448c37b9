//! SQLite persistence: connection, migrations and one repository per table.
//!
//! Repositories borrow a `Connection` (`Xxx::new(&conn)`), so they work the
//! same on a plain connection and inside a `Transaction`.

/// Connection management; opens the file and applies migrations.
pub mod db;

/// Versioned schema changes tracked in the `migrations` table.
pub mod migrations;

pub mod employees;
pub mod holidays;
pub mod ledger;
pub mod periods;
pub mod punches;
pub mod reasons;
pub mod schedules;
