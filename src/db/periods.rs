use crate::libs::error::Result;
use crate::libs::period::PeriodStatus;
use crate::libs::time_units::YearMonth;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const UPSERT_PERIOD: &str = "INSERT INTO periods (employee_id, year, month, status, updated_at, actor) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT (employee_id, year, month) DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at, actor = excluded.actor";
const SELECT_PERIOD: &str = "SELECT employee_id, year, month, status, updated_at, actor FROM periods WHERE employee_id = ?1 AND year = ?2 AND month = ?3";
const SELECT_BY_YEAR: &str = "SELECT employee_id, year, month, status, updated_at, actor FROM periods
    WHERE employee_id = ?1 AND year = ?2 AND status <> 'NOT_STARTED' ORDER BY month";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub employee_id: i64,
    pub year_month: YearMonth,
    pub status: PeriodStatus,
    pub updated_at: Option<NaiveDateTime>,
    pub actor: Option<String>,
}

impl PeriodRecord {
    /// The implicit record of a never-touched month.
    pub fn not_started(employee_id: i64, year_month: YearMonth) -> Self {
        Self {
            employee_id,
            year_month,
            status: PeriodStatus::NotStarted,
            updated_at: None,
            actor: None,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let year: i32 = row.get(1)?;
        let month: u32 = row.get(2)?;
        let year_month = YearMonth::new(year, month)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Integer, Box::new(e)))?;
        Ok(Self {
            employee_id: row.get(0)?,
            year_month,
            status: row.get(3)?,
            updated_at: row.get(4)?,
            actor: row.get(5)?,
        })
    }
}

pub struct Periods<'a> {
    conn: &'a Connection,
}

impl<'a> Periods<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Periods { conn }
    }

    pub fn fetch(&self, employee_id: i64, year_month: YearMonth) -> Result<Option<PeriodRecord>> {
        let record = self
            .conn
            .query_row(
                SELECT_PERIOD,
                params![employee_id, year_month.year(), year_month.month()],
                PeriodRecord::from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn upsert(&self, record: &PeriodRecord) -> Result<()> {
        self.conn.execute(
            UPSERT_PERIOD,
            params![
                record.employee_id,
                record.year_month.year(),
                record.year_month.month(),
                record.status,
                record.updated_at,
                record.actor.as_deref().unwrap_or_default(),
            ],
        )?;
        Ok(())
    }

    /// Periods of a year that have left `NOT_STARTED`, by month.
    pub fn fetch_year(&self, employee_id: i64, year: i32) -> Result<Vec<PeriodRecord>> {
        let mut stmt = self.conn.prepare(SELECT_BY_YEAR)?;
        let records = stmt
            .query_map(params![employee_id, year], PeriodRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}
