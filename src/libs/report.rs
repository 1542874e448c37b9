//! Fleet-wide roll-up of monthly summaries.

use crate::libs::aggregator::{CompensationPolicy, MonthlySummary};
use crate::libs::period::PeriodStatus;
use crate::libs::time_units::YearMonth;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetLine {
    pub employee_id: i64,
    pub employee_name: String,
    pub status: PeriodStatus,
    pub worked_min: i64,
    pub ordinary_overtime_min: i64,
    pub premium_overtime_min: i64,
    pub deficit_min: i64,
    pub technical_balance_min: i64,
    pub final_balance_min: i64,
    pub payable_value: f64,
    pub deductible_value: f64,
}

impl From<&MonthlySummary> for FleetLine {
    fn from(summary: &MonthlySummary) -> Self {
        FleetLine {
            employee_id: summary.employee_id,
            employee_name: summary.employee_name.clone(),
            status: summary.status,
            worked_min: summary.worked_min,
            ordinary_overtime_min: summary.ordinary_overtime_min,
            premium_overtime_min: summary.premium_overtime_min,
            deficit_min: summary.deficit_min,
            technical_balance_min: summary.technical_balance_min,
            final_balance_min: summary.final_balance_min,
            payable_value: summary.payable_ordinary_value + summary.payable_premium_value,
            deductible_value: summary.deductible_value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetTotals {
    pub employees: usize,
    pub worked_min: i64,
    pub ordinary_overtime_min: i64,
    pub premium_overtime_min: i64,
    pub deficit_min: i64,
    pub final_balance_min: i64,
    pub payable_value: f64,
    pub deductible_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub year_month: YearMonth,
    pub policy: CompensationPolicy,
    pub zero_at_month_end: bool,
    pub lines: Vec<FleetLine>,
    pub totals: FleetTotals,
}

impl FleetSummary {
    pub fn from_summaries(
        year_month: YearMonth,
        policy: CompensationPolicy,
        zero_at_month_end: bool,
        summaries: &[MonthlySummary],
    ) -> Self {
        let lines: Vec<FleetLine> = summaries.iter().map(FleetLine::from).collect();
        let totals = lines.iter().fold(
            FleetTotals {
                employees: lines.len(),
                ..FleetTotals::default()
            },
            |mut totals, line| {
                totals.worked_min += line.worked_min;
                totals.ordinary_overtime_min += line.ordinary_overtime_min;
                totals.premium_overtime_min += line.premium_overtime_min;
                totals.deficit_min += line.deficit_min;
                totals.final_balance_min += line.final_balance_min;
                totals.payable_value += line.payable_value;
                totals.deductible_value += line.deductible_value;
                totals
            },
        );

        FleetSummary {
            year_month,
            policy,
            zero_at_month_end,
            lines,
            totals,
        }
    }
}
