//! Employees as seen by the time bank: schedule, pay basis and status.

use crate::libs::error::{Result, TimeBankError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REFERENCE_HOURS: i64 = 220;

const INSERT_EMPLOYEE: &str = "INSERT INTO employees (name, schedule_id, monthly_salary, reference_hours, active) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_EMPLOYEE: &str =
    "UPDATE employees SET name = ?2, schedule_id = ?3, monthly_salary = ?4, reference_hours = ?5, active = ?6 WHERE id = ?1";
const SELECT_BY_ID: &str = "SELECT id, name, schedule_id, monthly_salary, reference_hours, active FROM employees WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, name, schedule_id, monthly_salary, reference_hours, active FROM employees ORDER BY id";
const SELECT_ACTIVE: &str =
    "SELECT id, name, schedule_id, monthly_salary, reference_hours, active FROM employees WHERE active = TRUE ORDER BY id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub schedule_id: i64,
    pub monthly_salary: f64,
    /// Hours the monthly salary is meant to cover.
    pub reference_hours: i64,
    pub active: bool,
}

impl Employee {
    pub fn new(name: &str, schedule_id: i64, monthly_salary: f64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            schedule_id,
            monthly_salary,
            reference_hours: DEFAULT_REFERENCE_HOURS,
            active: true,
        }
    }

    pub fn with_reference_hours(mut self, hours: i64) -> Self {
        self.reference_hours = hours;
        self
    }

    /// Monthly salary divided by the reference hours; zero without a reference.
    pub fn hourly_rate(&self) -> f64 {
        if self.reference_hours > 0 {
            self.monthly_salary / self.reference_hours as f64
        } else {
            0.0
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TimeBankError::InvalidInput("employee name is empty".to_string()));
        }
        if self.monthly_salary < 0.0 || self.reference_hours < 0 {
            return Err(TimeBankError::InvalidInput(format!(
                "salary and reference hours must not be negative (salary {}, hours {})",
                self.monthly_salary, self.reference_hours
            )));
        }
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            schedule_id: row.get(2)?,
            monthly_salary: row.get(3)?,
            reference_hours: row.get(4)?,
            active: row.get(5)?,
        })
    }
}

pub struct Employees<'a> {
    conn: &'a Connection,
}

impl<'a> Employees<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Employees { conn }
    }

    pub fn insert(&self, employee: &Employee) -> Result<i64> {
        employee.validate()?;
        self.conn.execute(
            INSERT_EMPLOYEE,
            params![
                employee.name,
                employee.schedule_id,
                employee.monthly_salary,
                employee.reference_hours,
                employee.active
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&self, employee: &Employee) -> Result<()> {
        let id = employee
            .id
            .ok_or_else(|| TimeBankError::InvalidInput("employee has no id".to_string()))?;
        employee.validate()?;
        let affected = self.conn.execute(
            UPDATE_EMPLOYEE,
            params![
                id,
                employee.name,
                employee.schedule_id,
                employee.monthly_salary,
                employee.reference_hours,
                employee.active
            ],
        )?;
        if affected == 0 {
            return Err(TimeBankError::EmployeeNotFound(id));
        }
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Option<Employee>> {
        let employee = self.conn.query_row(SELECT_BY_ID, params![id], Employee::from_row).optional()?;
        Ok(employee)
    }

    /// Fetches an employee or fails with `EmployeeNotFound`.
    pub fn require(&self, id: i64) -> Result<Employee> {
        self.get(id)?.ok_or(TimeBankError::EmployeeNotFound(id))
    }

    pub fn list(&self, active_only: bool) -> Result<Vec<Employee>> {
        let mut stmt = self.conn.prepare(if active_only { SELECT_ACTIVE } else { SELECT_ALL })?;
        let employees = stmt.query_map([], Employee::from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }
}
