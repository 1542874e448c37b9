//! Boundary operations of the time-bank engine.
//!
//! A [`TimeBank`] is a request-scoped context: it owns a store connection, the
//! name of the acting user and the engine settings. It keeps no balances
//! between calls; every read recomputes from stored punches and ledger entries.
//!
//! Each mutating operation runs in a single SQLite transaction. Concurrent
//! writers on the same employee and month rely on the store's own write
//! isolation; the engine adds no locking.

use crate::db::db::Db;
use crate::db::employees::Employees;
use crate::db::holidays::Holidays;
use crate::db::ledger::{EntryKind, LedgerEntry};
use crate::db::periods::{PeriodRecord, Periods};
use crate::db::punches::{DailyPunchRecord, Punches};
use crate::db::reasons::Reasons;
use crate::db::schedules::Schedules;
use crate::libs::aggregator::{aggregate_month, CompensationPolicy, MonthInput, MonthlySummary};
use crate::libs::config::{Config, EngineConfig};
use crate::libs::error::{Result, TimeBankError};
use crate::libs::ledger::AdjustmentLedger;
use crate::libs::period::{PeriodGate, PeriodStatus};
use crate::libs::report::FleetSummary;
use crate::libs::time_units::YearMonth;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashSet;
use tracing::{debug, info};

pub struct TimeBank {
    db: Db,
    actor: String,
    settings: EngineConfig,
}

impl TimeBank {
    pub fn new(db: Db, actor: &str) -> Self {
        TimeBank {
            db,
            actor: actor.to_string(),
            settings: EngineConfig::default(),
        }
    }

    /// Opens the application database with the saved configuration.
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::read()?;
        let db = Db::new()?;
        Ok(TimeBank::new(db, &config.actor()).with_settings(config.engine()))
    }

    pub fn with_settings(mut self, settings: EngineConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn conn(&self) -> &Connection {
        &self.db.conn
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Recomputes the month of one employee.
    pub fn monthly_summary(
        &self,
        employee_id: i64,
        year: i32,
        month: u32,
        policy: CompensationPolicy,
        zero_at_month_end: bool,
    ) -> Result<MonthlySummary> {
        let year_month = YearMonth::new(year, month)?;
        summarize(&self.db.conn, employee_id, year_month, policy, zero_at_month_end)
    }

    /// Stores a batch of day records for one month, all or nothing.
    ///
    /// The whole batch is validated before anything is written; a closed month
    /// rejects the batch and a never-touched month is opened by it.
    pub fn save_day_records(&mut self, employee_id: i64, year: i32, month: u32, records: &[DailyPunchRecord]) -> Result<()> {
        let year_month = YearMonth::new(year, month)?;
        Employees::new(&self.db.conn).require(employee_id)?;
        validate_batch(&self.db.conn, employee_id, year_month, records)?;

        let tx = self.db.conn.transaction()?;
        PeriodGate::new(&tx, &self.actor).ensure_writable(employee_id, year_month)?;
        let punches = Punches::new(&tx);
        for record in records {
            punches.upsert(record)?;
        }
        tx.commit()?;

        info!(employee_id, %year_month, days = records.len(), "day records saved");
        Ok(())
    }

    pub fn add_manual_adjustment(
        &mut self,
        employee_id: i64,
        date: NaiveDate,
        minutes: i64,
        note: Option<&str>,
    ) -> Result<LedgerEntry> {
        Employees::new(&self.db.conn).require(employee_id)?;
        let year_month = YearMonth::of(date);

        let tx = self.db.conn.transaction()?;
        PeriodGate::new(&tx, &self.actor).ensure_writable(employee_id, year_month)?;
        let entry = AdjustmentLedger::new(&tx).append(&LedgerEntry::manual(employee_id, year_month, minutes, note))?;
        tx.commit()?;

        info!(employee_id, %year_month, minutes, "manual adjustment added");
        Ok(entry)
    }

    /// Deletes a manual entry whose month is not closed.
    pub fn remove_manual_adjustment(&mut self, entry_id: i64) -> Result<LedgerEntry> {
        let tx = self.db.conn.transaction()?;
        let ledger = AdjustmentLedger::new(&tx);
        let entry = ledger.get(entry_id)?;
        if entry.kind != EntryKind::ManualAdjustment {
            return Err(TimeBankError::InvalidAdjustment(format!(
                "entry {} is a {} posting and cannot be deleted",
                entry_id, entry.kind
            )));
        }
        if PeriodGate::new(&tx, &self.actor).status(entry.employee_id, entry.year_month)? == PeriodStatus::Closed {
            return Err(TimeBankError::LockedPeriod {
                employee_id: entry.employee_id,
                year_month: entry.year_month,
            });
        }
        let removed = ledger.remove(entry_id)?;
        tx.commit()?;

        info!(entry_id, employee_id = removed.employee_id, year_month = %removed.year_month, "manual adjustment removed");
        Ok(removed)
    }

    /// Closes an open month and posts its settlement.
    ///
    /// The month's net day impact is carried forward so that later months see
    /// it in their carry-over; re-closing after a reopen only posts the change.
    /// With zero-at-month-end enabled, a closure entry brings the technical
    /// balance to zero.
    pub fn close_period(&mut self, employee_id: i64, year: i32, month: u32) -> Result<PeriodRecord> {
        let year_month = YearMonth::new(year, month)?;
        Employees::new(&self.db.conn).require(employee_id)?;

        let tx = self.db.conn.transaction()?;
        let record = PeriodGate::new(&tx, &self.actor).close(employee_id, year_month)?;
        let summary = summarize(&tx, employee_id, year_month, self.settings.policy, false)?;
        let ledger = AdjustmentLedger::new(&tx);

        let carried = ledger.month_totals(employee_id, year_month)?.carried;
        let delta = summary.day_impact_min() - carried;
        if delta != 0 {
            ledger.append(&LedgerEntry::carry_forward(employee_id, year_month, delta))?;
        }

        let balance = summary.technical_balance_min;
        if self.settings.zero_at_month_end && balance != 0 {
            ledger.append(&LedgerEntry::closure(employee_id, year_month, balance))?;
        }
        tx.commit()?;

        info!(
            employee_id,
            %year_month,
            carried = delta,
            balance,
            zero_at_month_end = self.settings.zero_at_month_end,
            "period closed"
        );
        Ok(record)
    }

    pub fn reopen_period(&mut self, employee_id: i64, year: i32, month: u32) -> Result<PeriodRecord> {
        let year_month = YearMonth::new(year, month)?;
        PeriodGate::new(&self.db.conn, &self.actor).reopen(employee_id, year_month)
    }

    /// Periods of a year that were ever opened, month ascending.
    pub fn list_available_periods(&self, employee_id: i64, year: i32) -> Result<Vec<PeriodRecord>> {
        PeriodGate::new(&self.db.conn, &self.actor).available(employee_id, year)
    }

    /// Audit trail of one month, or of every month when `year_month` is `None`.
    pub fn ledger_entries(&self, employee_id: i64, year_month: Option<YearMonth>) -> Result<Vec<LedgerEntry>> {
        let ledger = AdjustmentLedger::new(&self.db.conn);
        match year_month {
            Some(year_month) => ledger.list(employee_id, year_month),
            None => ledger.history(employee_id),
        }
    }

    /// Monthly summaries of every active employee.
    pub fn fleet_summary(&self, year: i32, month: u32, policy: CompensationPolicy, zero_at_month_end: bool) -> Result<FleetSummary> {
        let year_month = YearMonth::new(year, month)?;
        let summaries = Employees::new(&self.db.conn)
            .list(true)?
            .into_iter()
            .filter_map(|employee| employee.id)
            .map(|id| summarize(&self.db.conn, id, year_month, policy, zero_at_month_end))
            .collect::<Result<Vec<_>>>()?;
        Ok(FleetSummary::from_summaries(year_month, policy, zero_at_month_end, &summaries))
    }
}

fn validate_batch(conn: &Connection, employee_id: i64, year_month: YearMonth, records: &[DailyPunchRecord]) -> Result<()> {
    let reasons = Reasons::new(conn);
    let mut dates = HashSet::new();
    for record in records {
        if record.employee_id != employee_id {
            return Err(TimeBankError::InvalidInput(format!(
                "record of {} belongs to employee {}, not {}",
                record.date, record.employee_id, employee_id
            )));
        }
        if !year_month.contains(record.date) {
            return Err(TimeBankError::InvalidInput(format!("date {} is outside {}", record.date, year_month)));
        }
        if !dates.insert(record.date) {
            return Err(TimeBankError::InvalidInput(format!("date {} appears twice in the batch", record.date)));
        }
        record.validate()?;
        if let Some(reason_id) = record.reason_id {
            if reasons.get(reason_id)?.is_none() {
                return Err(TimeBankError::InvalidInput(format!("justification reason {} does not exist", reason_id)));
            }
        }
    }
    Ok(())
}

fn summarize(
    conn: &Connection,
    employee_id: i64,
    year_month: YearMonth,
    policy: CompensationPolicy,
    zero_at_month_end: bool,
) -> Result<MonthlySummary> {
    let employee = Employees::new(conn).require(employee_id)?;
    let schedule = Schedules::new(conn)
        .get(employee.schedule_id)?
        .ok_or(TimeBankError::ScheduleNotFound(employee.schedule_id))?;
    let expected = schedule.expected_day()?;
    let punches = Punches::new(conn).fetch_month(employee_id, year_month)?;
    let holidays = Holidays::new(conn).dates_in(year_month)?;
    let ledger = AdjustmentLedger::new(conn);
    let carry_over = ledger.carry_over_balance(employee_id, year_month)?;
    let entries = ledger.list(employee_id, year_month)?;
    let status = Periods::new(conn)
        .fetch(employee_id, year_month)?
        .map_or(PeriodStatus::NotStarted, |record| record.status);

    let summary = aggregate_month(&MonthInput {
        employee_id,
        employee: &employee,
        expected,
        year_month,
        punches: &punches,
        holidays: &holidays,
        carry_over,
        entries: &entries,
        policy,
        zero_at_month_end,
        status,
    });

    debug!(
        employee_id,
        %year_month,
        technical = summary.technical_balance_min,
        final_balance = summary.final_balance_min,
        "month recomputed"
    );
    Ok(summary)
}
