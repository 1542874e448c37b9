//! Clock-time, minute and calendar helpers shared by the classifier and the ledger.
//!
//! All time-of-day values cross the boundary as `HH:MM` strings and are turned
//! into minutes since midnight here. Year-months cross as the 7-character
//! `YYYY-MM` token represented by [`YearMonth`].
//!
//! ## Usage
//!
//! ```rust
//! use hourbank::libs::time_units::{parse_hhmm, format_signed_minutes, YearMonth};
//!
//! assert_eq!(parse_hhmm("entry", "08:30").unwrap(), 510);
//! assert_eq!(format_signed_minutes(-75), "-01:15");
//! let ym: YearMonth = "2025-02".parse().unwrap();
//! assert_eq!(ym.days().count(), 28);
//! ```

use crate::libs::error::{Result, TimeBankError};
use chrono::{Datelike, NaiveDate, Weekday};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parses a strict `HH:MM` token into minutes since midnight.
///
/// `field` names the offending input in the returned error.
pub fn parse_hhmm(field: &str, value: &str) -> Result<u32> {
    let invalid = || TimeBankError::invalid_time(field, value);
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let (hours, minutes) = (&value[0..2], &value[3..5]);
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Parses an entry/exit pair, rejecting an exit that precedes the entry.
pub fn parse_window(entry_field: &str, entry: &str, exit_field: &str, exit: &str) -> Result<(u32, u32)> {
    let start = parse_hhmm(entry_field, entry)?;
    let end = parse_hhmm(exit_field, exit)?;
    if end < start {
        return Err(TimeBankError::invalid_time(exit_field, exit));
    }
    Ok((start, end))
}

/// Formats a signed minute quantity as `[+-]HH:MM` (`00:00` for zero).
pub fn format_signed_minutes(minutes: i64) -> String {
    let sign = match minutes.signum() {
        1 => "+",
        -1 => "-",
        _ => "",
    };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Minutes between an entry and an exit, clamped to zero.
///
/// A missing half or an exit before the entry contributes nothing.
pub fn span_minutes(entry: Option<u32>, exit: Option<u32>) -> i64 {
    match (entry, exit) {
        (Some(entry), Some(exit)) if exit > entry => (exit - entry) as i64,
        _ => 0,
    }
}

/// Length of the intersection of two `[start, end)` minute windows.
pub fn overlap_minutes(a: (u32, u32), b: (u32, u32)) -> i64 {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    if end > start {
        (end - start) as i64
    } else {
        0
    }
}

/// Calendar classification of a date for the day classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
    Holiday,
}

impl DayType {
    /// Resolves the day type; a holiday wins over the weekday.
    pub fn of(date: NaiveDate, is_holiday: bool) -> Self {
        if is_holiday {
            return DayType::Holiday;
        }
        match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "WEEKDAY",
            DayType::Saturday => "SATURDAY",
            DayType::Sunday => "SUNDAY",
            DayType::Holiday => "HOLIDAY",
        }
    }

    /// Days on which no hours are owed.
    pub fn is_rest_day(&self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar month identified by year and month only ("competence").
///
/// Ordering follows the calendar, so `a < b` means `a` is an earlier month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(TimeBankError::InvalidPeriodToken(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every calendar date of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month;
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .into_iter()
            .flat_map(move |first| first.iter_days().take_while(move |d| d.month() == month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TimeBankError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimeBankError::InvalidPeriodToken(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        if !s[0..4].bytes().chain(s[5..7].bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[5..7].parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = TimeBankError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl ToSql for YearMonth {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for YearMonth {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: TimeBankError| FromSqlError::Other(Box::new(e)))
    }
}
