//! Period state machine gating edits of punches and manual adjustments.
//!
//! Each (employee, year, month) moves through:
//!
//! ```text
//!   NOT_STARTED ──first write──▶ OPEN ──close──▶ CLOSED
//!                                 ▲                 │
//!                                 └─────reopen──────┘
//! ```
//!
//! `NOT_STARTED` is never stored explicitly for an untouched month and a period
//! never returns to it. Writes against a `CLOSED` period fail with
//! `LockedPeriod`; a write against `NOT_STARTED` opens the period first.

use crate::db::periods::{PeriodRecord, Periods};
use crate::libs::error::{Result, TimeBankError};
use crate::libs::time_units::YearMonth;
use chrono::Local;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    NotStarted,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodAction {
    /// Implicit opening on the first write of a month.
    Open,
    Close,
    Reopen,
}

impl PeriodAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodAction::Open => "open",
            PeriodAction::Close => "close",
            PeriodAction::Reopen => "reopen",
        }
    }
}

impl PeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::NotStarted => "NOT_STARTED",
            PeriodStatus::Open => "OPEN",
            PeriodStatus::Closed => "CLOSED",
        }
    }

    /// Target status of `action`, or `None` when the transition is illegal.
    pub fn apply(self, action: PeriodAction) -> Option<PeriodStatus> {
        match (self, action) {
            (PeriodStatus::NotStarted, PeriodAction::Open) => Some(PeriodStatus::Open),
            (PeriodStatus::Open, PeriodAction::Close) => Some(PeriodStatus::Closed),
            (PeriodStatus::Closed, PeriodAction::Reopen) => Some(PeriodStatus::Open),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodStatus {
    type Err = TimeBankError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NOT_STARTED" => Ok(PeriodStatus::NotStarted),
            "OPEN" => Ok(PeriodStatus::Open),
            "CLOSED" => Ok(PeriodStatus::Closed),
            _ => Err(TimeBankError::InvalidInput(format!("unknown period status '{}'", s))),
        }
    }
}

impl ToSql for PeriodStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PeriodStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: TimeBankError| FromSqlError::Other(Box::new(e)))
    }
}

/// Reads and moves period status on behalf of an actor.
pub struct PeriodGate<'a> {
    periods: Periods<'a>,
    actor: &'a str,
}

impl<'a> PeriodGate<'a> {
    pub fn new(conn: &'a Connection, actor: &'a str) -> Self {
        PeriodGate {
            periods: Periods::new(conn),
            actor,
        }
    }

    /// Current record, `NOT_STARTED` when the month was never touched.
    pub fn record(&self, employee_id: i64, year_month: YearMonth) -> Result<PeriodRecord> {
        Ok(self
            .periods
            .fetch(employee_id, year_month)?
            .unwrap_or_else(|| PeriodRecord::not_started(employee_id, year_month)))
    }

    pub fn status(&self, employee_id: i64, year_month: YearMonth) -> Result<PeriodStatus> {
        Ok(self.record(employee_id, year_month)?.status)
    }

    fn transition(&self, employee_id: i64, year_month: YearMonth, action: PeriodAction) -> Result<PeriodRecord> {
        let current = self.record(employee_id, year_month)?;
        let status = current.status.apply(action).ok_or(TimeBankError::InvalidTransition {
            year_month,
            from: current.status,
            action: action.as_str(),
        })?;

        let record = PeriodRecord {
            employee_id,
            year_month,
            status,
            updated_at: Some(Local::now().naive_local()),
            actor: Some(self.actor.to_string()),
        };
        self.periods.upsert(&record)?;

        info!(employee_id, %year_month, from = %current.status, to = %status, actor = self.actor, "period transition");
        Ok(record)
    }

    /// Admits a write to punches or manual entries of the month.
    ///
    /// Opens a `NOT_STARTED` period and rejects a `CLOSED` one.
    pub fn ensure_writable(&self, employee_id: i64, year_month: YearMonth) -> Result<PeriodStatus> {
        match self.status(employee_id, year_month)? {
            PeriodStatus::Open => Ok(PeriodStatus::Open),
            PeriodStatus::NotStarted => Ok(self.transition(employee_id, year_month, PeriodAction::Open)?.status),
            PeriodStatus::Closed => Err(TimeBankError::LockedPeriod { employee_id, year_month }),
        }
    }

    pub fn close(&self, employee_id: i64, year_month: YearMonth) -> Result<PeriodRecord> {
        self.transition(employee_id, year_month, PeriodAction::Close)
    }

    pub fn reopen(&self, employee_id: i64, year_month: YearMonth) -> Result<PeriodRecord> {
        self.transition(employee_id, year_month, PeriodAction::Reopen)
    }

    pub fn available(&self, employee_id: i64, year: i32) -> Result<Vec<PeriodRecord>> {
        self.periods.fetch_year(employee_id, year)
    }
}
