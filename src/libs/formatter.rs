//! Display formatting shared by the table views and exporters.

use crate::libs::classifier::DayClassification;
use crate::libs::time_units::format_signed_minutes;
use serde::{Deserialize, Serialize};

/// A classified day with every field rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedDay {
    pub date: String,
    pub day_type: String,
    pub expected: String,
    pub worked: String,
    pub category: String,
    pub impact: String,
}

impl From<&DayClassification> for FormattedDay {
    fn from(day: &DayClassification) -> Self {
        FormattedDay {
            date: day.date.format("%Y-%m-%d").to_string(),
            day_type: day.day_type.to_string(),
            expected: format_duration(day.expected_minutes),
            worked: format_duration(day.worked_minutes),
            category: day.category.to_string(),
            impact: format_signed_minutes(day.impact),
        }
    }
}

/// Unsigned `HH:MM` for non-negative durations; hours may exceed 23.
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Money rounded to cents for display only.
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_keeps_hours_past_a_day() {
        assert_eq!(format_duration(1_500), "25:00");
        assert_eq!(format_duration(-5), "00:00");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(format_money(12.345_6), "12.35");
        assert_eq!(format_money(0.0), "0.00");
    }
}
