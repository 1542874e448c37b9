//! Typed failures raised by the time-bank engine.
//!
//! Every variant is a local validation or lookup failure surfaced synchronously
//! to the caller. None of them are retried by the engine; the command layer wraps
//! them into `anyhow::Error` for display.

use crate::libs::period::PeriodStatus;
use crate::libs::time_units::YearMonth;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeBankError {
    #[error("Invalid time in field '{field}': '{value}' (expected HH:MM, exit not before entry)")]
    InvalidTimeFormat { field: String, value: String },

    #[error("Invalid year-month token: '{0}' (expected YYYY-MM)")]
    InvalidPeriodToken(String),

    #[error("Employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("Schedule {0} not found")]
    ScheduleNotFound(i64),

    #[error("Ledger entry {0} not found")]
    EntryNotFound(i64),

    #[error("Period {year_month} of employee {employee_id} is closed")]
    LockedPeriod { employee_id: i64, year_month: YearMonth },

    #[error("Cannot {action} period {year_month}: status is {from}")]
    InvalidTransition {
        year_month: YearMonth,
        from: PeriodStatus,
        action: &'static str,
    },

    #[error("Invalid adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl TimeBankError {
    pub fn invalid_time(field: &str, value: &str) -> Self {
        TimeBankError::InvalidTimeFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeBankError>;
