//! Daily punch records: one row per employee per calendar date.
//!
//! A record carries up to three clock-in/clock-out pairs (morning, afternoon and
//! an extra window), an occurrence tag, an optional justification reason and
//! note, and a holiday flag. Times are stored exactly as exchanged, `HH:MM`.

use crate::libs::error::{Result, TimeBankError};
use crate::libs::time_units::{parse_hhmm, span_minutes, YearMonth};
use chrono::{Local, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const UPSERT_PUNCH: &str = "INSERT INTO punches (employee_id, date, morning_in, morning_out, afternoon_in, afternoon_out,
        extra_in, extra_out, occurrence, reason_id, note, holiday, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
    ON CONFLICT (employee_id, date) DO UPDATE SET
        morning_in = excluded.morning_in, morning_out = excluded.morning_out,
        afternoon_in = excluded.afternoon_in, afternoon_out = excluded.afternoon_out,
        extra_in = excluded.extra_in, extra_out = excluded.extra_out,
        occurrence = excluded.occurrence, reason_id = excluded.reason_id, note = excluded.note,
        holiday = excluded.holiday, updated_at = excluded.updated_at";
const SELECT_BY_MONTH: &str = "SELECT id, employee_id, date, morning_in, morning_out, afternoon_in, afternoon_out, extra_in, extra_out,
        occurrence, reason_id, note, holiday
    FROM punches WHERE employee_id = ?1 AND strftime('%Y-%m', date) = ?2 ORDER BY date";

/// What happened on a day, independently of the punches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occurrence {
    #[default]
    Normal,
    JustifiedAbsence,
    UnjustifiedAbsence,
}

impl Occurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occurrence::Normal => "NORMAL",
            Occurrence::JustifiedAbsence => "JUSTIFIED_ABSENCE",
            Occurrence::UnjustifiedAbsence => "UNJUSTIFIED_ABSENCE",
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occurrence {
    type Err = TimeBankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "" | "NORMAL" => Ok(Occurrence::Normal),
            "JUSTIFIED_ABSENCE" => Ok(Occurrence::JustifiedAbsence),
            "UNJUSTIFIED_ABSENCE" => Ok(Occurrence::UnjustifiedAbsence),
            _ => Err(TimeBankError::InvalidInput(format!("unknown occurrence '{}'", s))),
        }
    }
}

impl ToSql for Occurrence {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Occurrence {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: TimeBankError| FromSqlError::Other(Box::new(e)))
    }
}

/// One clock-in/clock-out pair; either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchPair {
    pub entry: Option<String>,
    pub exit: Option<String>,
}

impl PunchPair {
    pub fn new(entry: &str, exit: &str) -> Self {
        Self {
            entry: Some(entry.to_string()),
            exit: Some(exit.to_string()),
        }
    }

    /// Parses `HH:MM-HH:MM`.
    pub fn parse_range(field: &str, value: &str) -> Result<Self> {
        let (entry, exit) = value
            .split_once('-')
            .ok_or_else(|| TimeBankError::invalid_time(field, value))?;
        let pair = Self::new(entry.trim(), exit.trim());
        pair.validate(field)?;
        Ok(pair)
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.exit.is_none()
    }

    /// Worked minutes of the pair; malformed or incomplete pairs count zero.
    pub fn minutes(&self) -> i64 {
        let entry = self.entry.as_deref().and_then(|v| parse_hhmm("entry", v).ok());
        let exit = self.exit.as_deref().and_then(|v| parse_hhmm("exit", v).ok());
        span_minutes(entry, exit)
    }

    /// Checks both halves are `HH:MM` and the exit does not precede the entry.
    pub fn validate(&self, label: &str) -> Result<()> {
        let entry_field = format!("{}_in", label);
        let exit_field = format!("{}_out", label);
        let entry = self.entry.as_deref().map(|v| parse_hhmm(&entry_field, v)).transpose()?;
        let exit = self.exit.as_deref().map(|v| parse_hhmm(&exit_field, v)).transpose()?;
        if let (Some(entry), Some(exit)) = (entry, exit) {
            if exit < entry {
                return Err(TimeBankError::invalid_time(&exit_field, self.exit.as_deref().unwrap_or_default()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPunchRecord {
    pub id: Option<i64>,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub morning: PunchPair,
    pub afternoon: PunchPair,
    pub extra: PunchPair,
    pub occurrence: Occurrence,
    pub reason_id: Option<i64>,
    pub note: Option<String>,
    pub holiday: bool,
}

impl DailyPunchRecord {
    /// An empty `NORMAL` day.
    pub fn new(employee_id: i64, date: NaiveDate) -> Self {
        Self {
            id: None,
            employee_id,
            date,
            morning: PunchPair::default(),
            afternoon: PunchPair::default(),
            extra: PunchPair::default(),
            occurrence: Occurrence::Normal,
            reason_id: None,
            note: None,
            holiday: false,
        }
    }

    pub fn with_morning(mut self, entry: &str, exit: &str) -> Self {
        self.morning = PunchPair::new(entry, exit);
        self
    }

    pub fn with_afternoon(mut self, entry: &str, exit: &str) -> Self {
        self.afternoon = PunchPair::new(entry, exit);
        self
    }

    pub fn with_extra(mut self, entry: &str, exit: &str) -> Self {
        self.extra = PunchPair::new(entry, exit);
        self
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = occurrence;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.morning.validate("morning")?;
        self.afternoon.validate("afternoon")?;
        self.extra.validate("extra")?;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            date: row.get(2)?,
            morning: PunchPair {
                entry: row.get(3)?,
                exit: row.get(4)?,
            },
            afternoon: PunchPair {
                entry: row.get(5)?,
                exit: row.get(6)?,
            },
            extra: PunchPair {
                entry: row.get(7)?,
                exit: row.get(8)?,
            },
            occurrence: row.get(9)?,
            reason_id: row.get(10)?,
            note: row.get(11)?,
            holiday: row.get(12)?,
        })
    }
}

pub struct Punches<'a> {
    conn: &'a Connection,
}

impl<'a> Punches<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Punches { conn }
    }

    /// Inserts the record or replaces the existing one for (employee, date).
    pub fn upsert(&self, record: &DailyPunchRecord) -> Result<()> {
        self.conn.execute(
            UPSERT_PUNCH,
            params![
                record.employee_id,
                record.date,
                record.morning.entry,
                record.morning.exit,
                record.afternoon.entry,
                record.afternoon.exit,
                record.extra.entry,
                record.extra.exit,
                record.occurrence,
                record.reason_id,
                record.note,
                record.holiday,
                Local::now().naive_local(),
            ],
        )?;
        Ok(())
    }

    pub fn fetch_month(&self, employee_id: i64, year_month: YearMonth) -> Result<Vec<DailyPunchRecord>> {
        let mut stmt = self.conn.prepare(SELECT_BY_MONTH)?;
        let records = stmt
            .query_map(params![employee_id, year_month], DailyPunchRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}
