//! Work schedules shared by employees.
//!
//! A schedule holds the entry/exit of a morning block, an optional afternoon
//! block, an optional mid-day break and a tolerance in minutes. The expected
//! daily load is derived from it on every request; nothing derived is stored,
//! so editing a schedule only affects future recomputation.

use crate::libs::classifier::ExpectedDay;
use crate::libs::error::{Result, TimeBankError};
use crate::libs::time_units::{overlap_minutes, parse_window};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_SCHEDULE: &str = "INSERT INTO schedules (name, morning_in, morning_out, afternoon_in, afternoon_out, break_start, break_end, tolerance)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_SCHEDULE: &str = "UPDATE schedules SET name = ?2, morning_in = ?3, morning_out = ?4, afternoon_in = ?5, afternoon_out = ?6,
    break_start = ?7, break_end = ?8, tolerance = ?9 WHERE id = ?1";
const SELECT_BY_ID: &str = "SELECT id, name, morning_in, morning_out, afternoon_in, afternoon_out, break_start, break_end, tolerance
    FROM schedules WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, name, morning_in, morning_out, afternoon_in, afternoon_out, break_start, break_end, tolerance
    FROM schedules ORDER BY id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub id: Option<i64>,
    pub name: String,
    pub morning_in: String,
    pub morning_out: String,
    pub afternoon_in: Option<String>,
    pub afternoon_out: Option<String>,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
    /// Symmetric window, in minutes, around the expected load.
    pub tolerance: i64,
}

impl WorkSchedule {
    pub fn new(name: &str, morning_in: &str, morning_out: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            morning_in: morning_in.to_string(),
            morning_out: morning_out.to_string(),
            afternoon_in: None,
            afternoon_out: None,
            break_start: None,
            break_end: None,
            tolerance: 0,
        }
    }

    pub fn with_afternoon(mut self, entry: &str, exit: &str) -> Self {
        self.afternoon_in = Some(entry.to_string());
        self.afternoon_out = Some(exit.to_string());
        self
    }

    pub fn with_break(mut self, start: &str, end: &str) -> Self {
        self.break_start = Some(start.to_string());
        self.break_end = Some(end.to_string());
        self
    }

    pub fn with_tolerance(mut self, minutes: i64) -> Self {
        self.tolerance = minutes;
        self
    }

    fn optional_window(entry_field: &str, entry: &Option<String>, exit_field: &str, exit: &Option<String>) -> Result<Option<(u32, u32)>> {
        match (entry, exit) {
            (Some(entry), Some(exit)) => Ok(Some(parse_window(entry_field, entry, exit_field, exit)?)),
            (None, None) => Ok(None),
            (Some(_), None) => Err(TimeBankError::invalid_time(exit_field, "")),
            (None, Some(_)) => Err(TimeBankError::invalid_time(entry_field, "")),
        }
    }

    /// Derives the expected daily load.
    ///
    /// Expected minutes are the morning block plus the afternoon block minus
    /// whatever part of the break window falls inside those blocks. The
    /// afternoon block must not start before the morning block ends.
    pub fn expected_day(&self) -> Result<ExpectedDay> {
        if self.tolerance < 0 {
            return Err(TimeBankError::InvalidInput(format!("tolerance must not be negative: {}", self.tolerance)));
        }

        let morning = parse_window("morning_in", &self.morning_in, "morning_out", &self.morning_out)?;
        let afternoon = Self::optional_window("afternoon_in", &self.afternoon_in, "afternoon_out", &self.afternoon_out)?;
        if let (Some(afternoon), Some(afternoon_in)) = (afternoon, self.afternoon_in.as_deref()) {
            if afternoon.0 < morning.1 {
                return Err(TimeBankError::invalid_time("afternoon_in", afternoon_in));
            }
        }
        let pause = Self::optional_window("break_start", &self.break_start, "break_end", &self.break_end)?;

        let blocks: Vec<(u32, u32)> = std::iter::once(morning).chain(afternoon).collect();
        let gross: i64 = blocks.iter().map(|(start, end)| (end - start) as i64).sum();
        let pause_inside: i64 = pause
            .map(|p| blocks.iter().map(|block| overlap_minutes(*block, p)).sum::<i64>())
            .unwrap_or(0);

        Ok(ExpectedDay {
            minutes: gross - pause_inside,
            tolerance: self.tolerance,
        })
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            morning_in: row.get(2)?,
            morning_out: row.get(3)?,
            afternoon_in: row.get(4)?,
            afternoon_out: row.get(5)?,
            break_start: row.get(6)?,
            break_end: row.get(7)?,
            tolerance: row.get(8)?,
        })
    }
}

pub struct Schedules<'a> {
    conn: &'a Connection,
}

impl<'a> Schedules<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Schedules { conn }
    }

    /// Stores a validated schedule and returns its id.
    pub fn insert(&self, schedule: &WorkSchedule) -> Result<i64> {
        schedule.expected_day()?;
        self.conn.execute(
            INSERT_SCHEDULE,
            params![
                schedule.name,
                schedule.morning_in,
                schedule.morning_out,
                schedule.afternoon_in,
                schedule.afternoon_out,
                schedule.break_start,
                schedule.break_end,
                schedule.tolerance,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&self, schedule: &WorkSchedule) -> Result<()> {
        let id = schedule
            .id
            .ok_or_else(|| TimeBankError::InvalidInput("schedule has no id".to_string()))?;
        schedule.expected_day()?;
        let affected = self.conn.execute(
            UPDATE_SCHEDULE,
            params![
                id,
                schedule.name,
                schedule.morning_in,
                schedule.morning_out,
                schedule.afternoon_in,
                schedule.afternoon_out,
                schedule.break_start,
                schedule.break_end,
                schedule.tolerance,
            ],
        )?;
        if affected == 0 {
            return Err(TimeBankError::ScheduleNotFound(id));
        }
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Option<WorkSchedule>> {
        let schedule = self.conn.query_row(SELECT_BY_ID, params![id], WorkSchedule::from_row).optional()?;
        Ok(schedule)
    }

    pub fn list(&self) -> Result<Vec<WorkSchedule>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let schedules = stmt.query_map([], WorkSchedule::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(schedules)
    }
}
