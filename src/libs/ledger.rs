//! Adjustment ledger: manual credits/debits and period-closure postings.
//!
//! The balance carried into a month is never stored. It is re-derived on every
//! read by summing all entries of earlier months, which keeps recomputation
//! idempotent and the audit trail complete.

use crate::db::ledger::{EntryKind, LedgerEntries, LedgerEntry};
use crate::libs::error::{Result, TimeBankError};
use crate::libs::time_units::YearMonth;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Current-month entry sums split by kind.
///
/// `carried` mirrors the month's own day impacts and is therefore kept out of
/// that month's balance; it only counts in the carry-over of later months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTotals {
    pub manual: i64,
    pub closure: i64,
    pub carried: i64,
}

impl EntryTotals {
    pub fn of(entries: &[LedgerEntry]) -> Self {
        entries.iter().fold(EntryTotals::default(), |mut totals, entry| {
            match entry.kind {
                EntryKind::ManualAdjustment => totals.manual += entry.minutes,
                EntryKind::ClosurePayout | EntryKind::ClosureDeduction => totals.closure += entry.minutes,
                EntryKind::CarryForward => totals.carried += entry.minutes,
            }
            totals
        })
    }
}

pub struct AdjustmentLedger<'a> {
    entries: LedgerEntries<'a>,
}

impl<'a> AdjustmentLedger<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        AdjustmentLedger {
            entries: LedgerEntries::new(conn),
        }
    }

    fn validate(entry: &LedgerEntry) -> Result<()> {
        if entry.minutes == 0 {
            return Err(TimeBankError::InvalidAdjustment("minutes must not be zero".to_string()));
        }
        match entry.kind {
            EntryKind::ClosurePayout if entry.minutes > 0 => Err(TimeBankError::InvalidAdjustment(
                "a closure payout must be a negative posting".to_string(),
            )),
            EntryKind::ClosureDeduction if entry.minutes < 0 => Err(TimeBankError::InvalidAdjustment(
                "a closure deduction must be a positive posting".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Validates and stores an entry, returning it as persisted.
    pub fn append(&self, entry: &LedgerEntry) -> Result<LedgerEntry> {
        Self::validate(entry)?;
        let id = self.entries.insert(entry)?;
        let stored = self.entries.get(id)?.ok_or(TimeBankError::EntryNotFound(id))?;
        debug!(
            id,
            employee_id = stored.employee_id,
            year_month = %stored.year_month,
            minutes = stored.minutes,
            kind = %stored.kind,
            "ledger entry appended"
        );
        Ok(stored)
    }

    pub fn get(&self, entry_id: i64) -> Result<LedgerEntry> {
        self.entries.get(entry_id)?.ok_or(TimeBankError::EntryNotFound(entry_id))
    }

    /// Deletes a manual entry. Closure entries are permanent.
    pub fn remove(&self, entry_id: i64) -> Result<LedgerEntry> {
        let entry = self.get(entry_id)?;
        if entry.kind != EntryKind::ManualAdjustment {
            return Err(TimeBankError::InvalidAdjustment(format!(
                "entry {} is a {} posting and cannot be deleted",
                entry_id, entry.kind
            )));
        }
        self.entries.delete(entry_id)?;
        debug!(id = entry_id, employee_id = entry.employee_id, "ledger entry removed");
        Ok(entry)
    }

    /// Sum of every entry strictly before `before_month`.
    pub fn carry_over_balance(&self, employee_id: i64, before_month: YearMonth) -> Result<i64> {
        self.entries.sum_before(employee_id, before_month)
    }

    /// Entries of a month, oldest first.
    pub fn list(&self, employee_id: i64, year_month: YearMonth) -> Result<Vec<LedgerEntry>> {
        self.entries.fetch_month(employee_id, year_month)
    }

    /// Manual, closure and carried sums of one month.
    pub fn month_totals(&self, employee_id: i64, year_month: YearMonth) -> Result<EntryTotals> {
        Ok(EntryTotals::of(&self.list(employee_id, year_month)?))
    }

    pub fn history(&self, employee_id: i64) -> Result<Vec<LedgerEntry>> {
        self.entries.fetch_all(employee_id)
    }
}
