//! Database schema migration management and versioning system.
//!
//! Applies versioned schema changes in order, each batch inside a transaction,
//! and records them in a `migrations` table so that every database file can be
//! brought to the latest layout on open.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hourbank::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("hourbank.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change with its version and transformation function.
#[derive(Debug, Clone)]
struct Migration {
    /// Unique version number for ordering and tracking
    version: u32,
    /// Human-readable name describing the migration's purpose
    name: &'static str,
    /// Function that applies the schema changes within a transaction
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, applied in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    /// Registers all database migrations in chronological order.
    fn register_migrations(&mut self) {
        // Version 1: schedules, employees, punches, ledger and periods
        self.add_migration(1, "create_time_bank_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS schedules (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    morning_in TEXT NOT NULL,
                    morning_out TEXT NOT NULL,
                    afternoon_in TEXT,
                    afternoon_out TEXT,
                    break_start TEXT,
                    break_end TEXT,
                    tolerance INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS employees (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    schedule_id INTEGER NOT NULL REFERENCES schedules(id),
                    monthly_salary REAL NOT NULL DEFAULT 0,
                    reference_hours INTEGER NOT NULL DEFAULT 220,
                    active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS punches (
                    id INTEGER PRIMARY KEY,
                    employee_id INTEGER NOT NULL REFERENCES employees(id),
                    date DATE NOT NULL,
                    morning_in TEXT,
                    morning_out TEXT,
                    afternoon_in TEXT,
                    afternoon_out TEXT,
                    extra_in TEXT,
                    extra_out TEXT,
                    occurrence TEXT NOT NULL DEFAULT 'NORMAL',
                    reason_id INTEGER,
                    note TEXT,
                    holiday BOOLEAN NOT NULL DEFAULT FALSE,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                    UNIQUE (employee_id, date)
                )",
                [],
            )?;

            // AUTOINCREMENT keeps ids of deleted manual entries from being reused
            tx.execute(
                "CREATE TABLE IF NOT EXISTS ledger (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    employee_id INTEGER NOT NULL REFERENCES employees(id),
                    year_month TEXT NOT NULL,
                    minutes INTEGER NOT NULL,
                    kind TEXT NOT NULL,
                    note TEXT,
                    created_at TIMESTAMP NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS periods (
                    employee_id INTEGER NOT NULL REFERENCES employees(id),
                    year INTEGER NOT NULL,
                    month INTEGER NOT NULL,
                    status TEXT NOT NULL,
                    updated_at TIMESTAMP NOT NULL,
                    actor TEXT NOT NULL,
                    PRIMARY KEY (employee_id, year, month)
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_punches_employee_date ON punches(employee_id, date)", [])?;
            // Carry-over is re-derived by summation on every read
            tx.execute("CREATE INDEX IF NOT EXISTS idx_ledger_employee_month ON ledger(employee_id, year_month)", [])?;

            Ok(())
        });

        // Version 2: holiday calendar and absence justification reasons
        self.add_migration(2, "add_holidays_and_reasons", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS holidays (
                    id INTEGER PRIMARY KEY,
                    date DATE NOT NULL UNIQUE,
                    description TEXT
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS reasons (
                    id INTEGER PRIMARY KEY,
                    description TEXT NOT NULL UNIQUE
                )",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Executes all pending migrations in a single transaction.
    ///
    /// If any migration fails the whole batch is rolled back and the error is
    /// returned, leaving the schema at its previous version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Applied migrations as (version, name, applied_at), ordered by version.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Removes migration records above `target_version` (debug builds only).
    ///
    /// Schema changes are not reversed; only the tracking rows are dropped.
    #[cfg(debug_assertions)]
    pub fn rollback_to(&self, conn: &mut Connection, target_version: u32) -> Result<()> {
        let current_version = self.get_current_version(conn)?;

        if target_version >= current_version {
            msg_info!(Message::NothingToRollback);
            return Ok(());
        }

        msg_info!(Message::RollingBack(current_version, target_version));
        conn.execute("DELETE FROM migrations WHERE version > ?1", params![target_version])?;

        msg_success!(Message::RollbackCompleted(target_version));
        Ok(())
    }
}

/// Applies all pending migrations to `conn`.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    let latest = manager.migrations.last().map(|m| m.version).unwrap_or(0);
    Ok(current < latest)
}
