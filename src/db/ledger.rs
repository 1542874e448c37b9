//! Storage for time-bank ledger entries.
//!
//! Entries are signed minute postings scoped to an employee and a year-month.
//! Rows are never updated; manual entries may be deleted, everything else is
//! an append-only audit record.

use crate::libs::error::{Result, TimeBankError};
use crate::libs::time_units::YearMonth;
use chrono::{Local, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INSERT_ENTRY: &str = "INSERT INTO ledger (employee_id, year_month, minutes, kind, note, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const DELETE_ENTRY: &str = "DELETE FROM ledger WHERE id = ?1";
const SELECT_BY_ID: &str = "SELECT id, employee_id, year_month, minutes, kind, note, created_at FROM ledger WHERE id = ?1";
const SELECT_BY_MONTH: &str = "SELECT id, employee_id, year_month, minutes, kind, note, created_at FROM ledger
    WHERE employee_id = ?1 AND year_month = ?2 ORDER BY created_at, id";
const SELECT_BY_EMPLOYEE: &str = "SELECT id, employee_id, year_month, minutes, kind, note, created_at FROM ledger
    WHERE employee_id = ?1 ORDER BY created_at, id";
const SUM_BEFORE: &str = "SELECT COALESCE(SUM(minutes), 0) FROM ledger WHERE employee_id = ?1 AND year_month < ?2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    ManualAdjustment,
    ClosurePayout,
    ClosureDeduction,
    /// Net day impact of a closed month, carried into later months.
    CarryForward,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::ManualAdjustment => "MANUAL_ADJUSTMENT",
            EntryKind::ClosurePayout => "CLOSURE_PAYOUT",
            EntryKind::ClosureDeduction => "CLOSURE_DEDUCTION",
            EntryKind::CarryForward => "CARRY_FORWARD",
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, EntryKind::ClosurePayout | EntryKind::ClosureDeduction)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = TimeBankError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MANUAL_ADJUSTMENT" => Ok(EntryKind::ManualAdjustment),
            "CLOSURE_PAYOUT" => Ok(EntryKind::ClosurePayout),
            "CLOSURE_DEDUCTION" => Ok(EntryKind::ClosureDeduction),
            "CARRY_FORWARD" => Ok(EntryKind::CarryForward),
            _ => Err(TimeBankError::InvalidInput(format!("unknown ledger entry kind '{}'", s))),
        }
    }
}

impl ToSql for EntryKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: TimeBankError| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Option<i64>,
    pub employee_id: i64,
    pub year_month: YearMonth,
    pub minutes: i64,
    pub kind: EntryKind,
    pub note: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl LedgerEntry {
    pub fn manual(employee_id: i64, year_month: YearMonth, minutes: i64, note: Option<&str>) -> Self {
        Self {
            id: None,
            employee_id,
            year_month,
            minutes,
            kind: EntryKind::ManualAdjustment,
            note: note.map(str::to_string),
            created_at: None,
        }
    }

    /// Closure posting that brings a month's balance to zero.
    ///
    /// A positive balance is paid out (negative entry), a negative one is
    /// deducted (positive entry).
    pub fn closure(employee_id: i64, year_month: YearMonth, balance: i64) -> Self {
        let kind = if balance > 0 { EntryKind::ClosurePayout } else { EntryKind::ClosureDeduction };
        Self {
            id: None,
            employee_id,
            year_month,
            minutes: -balance,
            kind,
            note: None,
            created_at: None,
        }
    }

    /// Posting of a closed month's day impacts so that carry-over sees them.
    pub fn carry_forward(employee_id: i64, year_month: YearMonth, minutes: i64) -> Self {
        Self {
            id: None,
            employee_id,
            year_month,
            minutes,
            kind: EntryKind::CarryForward,
            note: None,
            created_at: None,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            year_month: row.get(2)?,
            minutes: row.get(3)?,
            kind: row.get(4)?,
            note: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

pub struct LedgerEntries<'a> {
    conn: &'a Connection,
}

impl<'a> LedgerEntries<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        LedgerEntries { conn }
    }

    /// Stores the entry stamped with the current time and returns its id.
    pub fn insert(&self, entry: &LedgerEntry) -> Result<i64> {
        let created_at = entry.created_at.unwrap_or_else(|| Local::now().naive_local());
        self.conn.execute(
            INSERT_ENTRY,
            params![entry.employee_id, entry.year_month, entry.minutes, entry.kind, entry.note, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> Result<Option<LedgerEntry>> {
        let entry = self.conn.query_row(SELECT_BY_ID, params![id], LedgerEntry::from_row).optional()?;
        Ok(entry)
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_ENTRY, params![id])?)
    }

    /// Entries of one month, oldest first.
    pub fn fetch_month(&self, employee_id: i64, year_month: YearMonth) -> Result<Vec<LedgerEntry>> {
        let mut stmt = self.conn.prepare(SELECT_BY_MONTH)?;
        let entries = stmt
            .query_map(params![employee_id, year_month], LedgerEntry::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Every entry of an employee, oldest first.
    pub fn fetch_all(&self, employee_id: i64) -> Result<Vec<LedgerEntry>> {
        let mut stmt = self.conn.prepare(SELECT_BY_EMPLOYEE)?;
        let entries = stmt
            .query_map(params![employee_id], LedgerEntry::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Sum of all entries with a year-month strictly before `year_month`.
    pub fn sum_before(&self, employee_id: i64, year_month: YearMonth) -> Result<i64> {
        let sum = self.conn.query_row(SUM_BEFORE, params![employee_id, year_month], |row| row.get(0))?;
        Ok(sum)
    }
}
