use crate::libs::error::{Result, TimeBankError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_REASON: &str = "INSERT INTO reasons (description) VALUES (?1)";
const SELECT_BY_ID: &str = "SELECT id, description FROM reasons WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, description FROM reasons ORDER BY description";

/// Justification reason referenced by absence records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub id: Option<i64>,
    pub description: String,
}

impl Reason {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            description: row.get(1)?,
        })
    }
}

pub struct Reasons<'a> {
    conn: &'a Connection,
}

impl<'a> Reasons<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Reasons { conn }
    }

    pub fn insert(&self, description: &str) -> Result<i64> {
        if description.trim().is_empty() {
            return Err(TimeBankError::InvalidInput("reason description is empty".to_string()));
        }
        self.conn.execute(INSERT_REASON, params![description.trim()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> Result<Option<Reason>> {
        let reason = self.conn.query_row(SELECT_BY_ID, params![id], Reason::from_row).optional()?;
        Ok(reason)
    }

    pub fn list(&self) -> Result<Vec<Reason>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let reasons = stmt.query_map([], Reason::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reasons)
    }
}
