//! Holiday calendar consulted when resolving day types.

use crate::libs::error::{Result, TimeBankError};
use crate::libs::time_units::YearMonth;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const INSERT_HOLIDAY: &str = "INSERT INTO holidays (date, description) VALUES (?1, ?2)
    ON CONFLICT (date) DO UPDATE SET description = excluded.description";
const DELETE_HOLIDAY: &str = "DELETE FROM holidays WHERE date = ?1";
const SELECT_BY_YEAR: &str = "SELECT id, date, description FROM holidays WHERE strftime('%Y', date) = ?1 ORDER BY date";
const SELECT_BY_MONTH: &str = "SELECT id, date, description FROM holidays WHERE strftime('%Y-%m', date) = ?1 ORDER BY date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Holiday {
    pub fn new(date: NaiveDate, description: Option<&str>) -> Self {
        Self {
            id: None,
            date,
            description: description.map(str::to_string),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            description: row.get(2)?,
        })
    }
}

pub struct Holidays<'a> {
    conn: &'a Connection,
}

impl<'a> Holidays<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Holidays { conn }
    }

    /// Registers a holiday; re-registering a date replaces its description.
    pub fn insert(&self, holiday: &Holiday) -> Result<()> {
        self.conn.execute(INSERT_HOLIDAY, params![holiday.date, holiday.description])?;
        Ok(())
    }

    pub fn delete(&self, date: NaiveDate) -> Result<()> {
        let affected = self.conn.execute(DELETE_HOLIDAY, params![date])?;
        if affected == 0 {
            return Err(TimeBankError::InvalidInput(format!("no holiday registered on {}", date)));
        }
        Ok(())
    }

    pub fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>> {
        let mut stmt = self.conn.prepare(SELECT_BY_YEAR)?;
        let holidays = stmt
            .query_map(params![format!("{:04}", year)], Holiday::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(holidays)
    }

    /// Registered holiday dates inside a month.
    pub fn dates_in(&self, year_month: YearMonth) -> Result<HashSet<NaiveDate>> {
        let mut stmt = self.conn.prepare(SELECT_BY_MONTH)?;
        let dates = stmt
            .query_map(params![year_month], |row| Holiday::from_row(row).map(|h| h.date))?
            .collect::<rusqlite::Result<HashSet<_>>>()?;
        Ok(dates)
    }
}
