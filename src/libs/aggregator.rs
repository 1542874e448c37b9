//! Monthly aggregation of classified days into a time-bank summary.
//!
//! [`aggregate_month`] is a pure function: it receives everything it needs in a
//! [`MonthInput`] (punches, holidays, carry-over, the month's ledger entries)
//! and never touches the store. Recomputing with unchanged inputs yields an
//! identical [`MonthlySummary`].
//!
//! ## Balance
//!
//! ```text
//! technical = carry_over + ordinary + premium + deficit + manual + closure
//! final     = 0 with zero-at-month-end, technical otherwise
//! ```
//!
//! Absence impacts are folded into `deficit`, so the balance always equals the
//! carry-over plus the sum of the day impacts plus the month's entries.

use crate::db::employees::Employee;
use crate::db::ledger::LedgerEntry;
use crate::db::punches::DailyPunchRecord;
use crate::libs::classifier::{classify_day, Category, DayClassification, ExpectedDay};
use crate::libs::ledger::EntryTotals;
use crate::libs::period::PeriodStatus;
use crate::libs::time_units::{DayType, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// How owed hours interact with overtime before anything is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CompensationPolicy {
    /// Deficit is netted against ordinary overtime, then premium overtime.
    #[default]
    OffsetAgainstOvertime,
    /// Overtime is paid and deficit deducted independently.
    AlwaysDeduct,
}

impl CompensationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationPolicy::OffsetAgainstOvertime => "OFFSET_AGAINST_OVERTIME",
            CompensationPolicy::AlwaysDeduct => "ALWAYS_DEDUCT",
        }
    }
}

impl fmt::Display for CompensationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minutes left to pay or deduct once the policy has been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub payable_ordinary_min: i64,
    pub payable_premium_min: i64,
    pub deductible_min: i64,
}

impl Payout {
    /// Paid minus deducted minutes.
    pub fn net_minutes(&self) -> i64 {
        self.payable_ordinary_min + self.payable_premium_min - self.deductible_min
    }
}

/// Nets overtime and deficit according to `policy`.
///
/// `deficit` is the signed (non-positive) deficit total; overtime buckets are
/// non-negative.
pub fn apply_policy(policy: CompensationPolicy, ordinary: i64, premium: i64, deficit: i64) -> Payout {
    let owed = deficit.abs();
    match policy {
        CompensationPolicy::AlwaysDeduct => Payout {
            payable_ordinary_min: ordinary,
            payable_premium_min: premium,
            deductible_min: owed,
        },
        CompensationPolicy::OffsetAgainstOvertime => {
            let from_ordinary = owed.min(ordinary);
            let remaining = owed - from_ordinary;
            let from_premium = remaining.min(premium);
            Payout {
                payable_ordinary_min: ordinary - from_ordinary,
                payable_premium_min: premium - from_premium,
                deductible_min: remaining - from_premium,
            }
        }
    }
}

/// Everything one month's computation reads.
pub struct MonthInput<'a> {
    pub employee_id: i64,
    pub employee: &'a Employee,
    pub expected: ExpectedDay,
    pub year_month: YearMonth,
    pub punches: &'a [DailyPunchRecord],
    pub holidays: &'a HashSet<NaiveDate>,
    pub carry_over: i64,
    pub entries: &'a [LedgerEntry],
    pub policy: CompensationPolicy,
    pub zero_at_month_end: bool,
    pub status: PeriodStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub employee_id: i64,
    pub employee_name: String,
    pub year_month: YearMonth,
    pub policy: CompensationPolicy,
    pub zero_at_month_end: bool,
    pub status: PeriodStatus,
    pub days: Vec<DayClassification>,

    pub worked_min: i64,
    pub expected_min: i64,
    pub ordinary_overtime_min: i64,
    pub premium_overtime_min: i64,
    pub deficit_min: i64,
    pub justified_absence_days: u32,
    pub unjustified_absence_days: u32,

    pub carry_over_min: i64,
    pub manual_entries_min: i64,
    pub closure_entries_min: i64,
    pub technical_balance_min: i64,
    /// Informational only; the close action is what posts it.
    pub closing_adjustment_min: i64,
    pub final_balance_min: i64,

    pub payout: Payout,
    pub hourly_rate: f64,
    pub payable_ordinary_value: f64,
    pub payable_premium_value: f64,
    pub deductible_value: f64,
}

impl MonthlySummary {
    /// Sum of the day impacts of the month.
    pub fn day_impact_min(&self) -> i64 {
        self.ordinary_overtime_min + self.premium_overtime_min + self.deficit_min
    }
}

fn minutes_value(minutes: i64, hourly_rate: f64) -> f64 {
    minutes as f64 * hourly_rate / 60.0
}

/// Classifies every date of the month and folds the result into a summary.
pub fn aggregate_month(input: &MonthInput) -> MonthlySummary {
    let by_date: HashMap<NaiveDate, &DailyPunchRecord> = input
        .punches
        .iter()
        .filter(|record| input.year_month.contains(record.date))
        .map(|record| (record.date, record))
        .collect();

    let days: Vec<DayClassification> = input
        .year_month
        .days()
        .map(|date| {
            let record = by_date.get(&date).copied();
            let is_holiday = input.holidays.contains(&date) || record.is_some_and(|r| r.holiday);
            classify_day(date, record, &input.expected, DayType::of(date, is_holiday))
        })
        .collect();

    let mut worked = 0;
    let mut expected = 0;
    let mut ordinary = 0;
    let mut premium = 0;
    let mut deficit = 0;
    let mut justified_days = 0;
    let mut unjustified_days = 0;

    for day in &days {
        worked += day.worked_minutes;
        expected += day.expected_minutes;
        match day.category {
            Category::Normal => {}
            Category::OrdinaryOvertime => ordinary += day.impact,
            Category::PremiumOvertime => premium += day.impact,
            Category::Deficit => deficit += day.impact,
            Category::JustifiedAbsence => {
                justified_days += 1;
                deficit += day.impact;
            }
            Category::UnjustifiedAbsence => {
                unjustified_days += 1;
                deficit += day.impact;
            }
        }
    }

    let totals = EntryTotals::of(input.entries);
    let technical = input.carry_over + ordinary + premium + deficit + totals.manual + totals.closure;
    let (final_balance, closing_adjustment) = if input.zero_at_month_end {
        (0, -technical)
    } else {
        (technical, 0)
    };

    let payout = apply_policy(input.policy, ordinary, premium, deficit);
    let hourly_rate = input.employee.hourly_rate();

    MonthlySummary {
        employee_id: input.employee_id,
        employee_name: input.employee.name.clone(),
        year_month: input.year_month,
        policy: input.policy,
        zero_at_month_end: input.zero_at_month_end,
        status: input.status,
        days,
        worked_min: worked,
        expected_min: expected,
        ordinary_overtime_min: ordinary,
        premium_overtime_min: premium,
        deficit_min: deficit,
        justified_absence_days: justified_days,
        unjustified_absence_days: unjustified_days,
        carry_over_min: input.carry_over,
        manual_entries_min: totals.manual,
        closure_entries_min: totals.closure,
        technical_balance_min: technical,
        closing_adjustment_min: closing_adjustment,
        final_balance_min: final_balance,
        payout,
        hourly_rate,
        payable_ordinary_value: minutes_value(payout.payable_ordinary_min, hourly_rate),
        payable_premium_value: minutes_value(payout.payable_premium_min, hourly_rate),
        deductible_value: minutes_value(payout.deductible_min, hourly_rate),
    }
}
