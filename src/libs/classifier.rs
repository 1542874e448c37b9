//! Single-day classification of attendance punches.
//!
//! Given one day's punch record (or none), the expected minutes of the employee's
//! schedule and the resolved [`DayType`], this module computes how many minutes
//! were worked, the signed difference after tolerance, the hour category and the
//! signed impact posted to the time bank for that day.
//!
//! ## Classification order
//!
//! ```text
//! 1. absence occurrence   -> JUSTIFIED_ABSENCE / UNJUSTIFIED_ABSENCE, never positive
//! 2. holiday or weekend   -> PREMIUM_OVERTIME (worked > 0) or NORMAL, impact = worked
//! 3. ordinary weekday     -> ORDINARY_OVERTIME / DEFICIT / NORMAL by the snapped diff
//! ```
//!
//! Absence always wins over the calendar, and rest-day work is never subject to
//! the tolerance window.

use crate::db::punches::{DailyPunchRecord, Occurrence};
use crate::libs::time_units::DayType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour category assigned to a classified day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Normal,
    OrdinaryOvertime,
    PremiumOvertime,
    Deficit,
    JustifiedAbsence,
    UnjustifiedAbsence,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "NORMAL",
            Category::OrdinaryOvertime => "ORDINARY_OVERTIME",
            Category::PremiumOvertime => "PREMIUM_OVERTIME",
            Category::Deficit => "DEFICIT",
            Category::JustifiedAbsence => "JUSTIFIED_ABSENCE",
            Category::UnjustifiedAbsence => "UNJUSTIFIED_ABSENCE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected daily load of a schedule, computed once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedDay {
    pub minutes: i64,
    pub tolerance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub expected_minutes: i64,
    pub worked_minutes: i64,
    /// `worked - expected`, snapped to zero inside the tolerance window.
    pub diff: i64,
    pub category: Category,
    /// Signed minutes this day contributes to the balance.
    pub impact: i64,
}

/// Sum of the present punch pairs of a record, each clamped to zero.
pub fn worked_minutes(record: &DailyPunchRecord) -> i64 {
    record.morning.minutes() + record.afternoon.minutes() + record.extra.minutes()
}

fn snap(diff: i64, tolerance: i64) -> i64 {
    if diff.abs() <= tolerance {
        0
    } else {
        diff
    }
}

/// Classifies one calendar day.
///
/// A missing record is treated as an empty `NORMAL` day.
pub fn classify_day(
    date: NaiveDate,
    record: Option<&DailyPunchRecord>,
    expected: &ExpectedDay,
    day_type: DayType,
) -> DayClassification {
    let occurrence = record.map(|r| r.occurrence).unwrap_or(Occurrence::Normal);

    let absence = match occurrence {
        Occurrence::Normal => None,
        Occurrence::JustifiedAbsence => Some(Category::JustifiedAbsence),
        Occurrence::UnjustifiedAbsence => Some(Category::UnjustifiedAbsence),
    };

    if let Some(category) = absence {
        let diff = snap(-expected.minutes, expected.tolerance);
        let impact = if diff < 0 { diff } else { -expected.minutes };
        return DayClassification {
            date,
            day_type,
            expected_minutes: expected.minutes,
            worked_minutes: 0,
            diff,
            category,
            impact,
        };
    }

    let worked = record.map(worked_minutes).unwrap_or(0);

    if day_type.is_rest_day() {
        let category = if worked > 0 { Category::PremiumOvertime } else { Category::Normal };
        return DayClassification {
            date,
            day_type,
            expected_minutes: 0,
            worked_minutes: worked,
            diff: worked,
            category,
            impact: worked,
        };
    }

    let diff = snap(worked - expected.minutes, expected.tolerance);
    let category = match diff.signum() {
        1 => Category::OrdinaryOvertime,
        -1 => Category::Deficit,
        _ => Category::Normal,
    };

    DayClassification {
        date,
        day_type,
        expected_minutes: expected.minutes,
        worked_minutes: worked,
        diff,
        category,
        impact: diff,
    }
}
