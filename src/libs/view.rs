use super::aggregator::MonthlySummary;
use super::formatter::{format_duration, format_money, FormattedDay};
use super::report::FleetSummary;
use super::time_units::format_signed_minutes;
use crate::db::employees::Employee;
use crate::db::holidays::Holiday;
use crate::db::ledger::LedgerEntry;
use crate::db::periods::PeriodRecord;
use crate::db::reasons::Reason;
use crate::db::schedules::WorkSchedule;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn days(summary: &MonthlySummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "DAY", "EXPECTED", "WORKED", "CATEGORY", "IMPACT"]);
        for day in summary.days.iter().map(FormattedDay::from) {
            table.add_row(row![day.date, day.day_type, day.expected, day.worked, day.category, r->day.impact]);
        }
        table.printstd();

        Ok(())
    }

    pub fn summary(summary: &MonthlySummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["EMPLOYEE", format!("{} ({})", summary.employee_name, summary.employee_id)]);
        table.add_row(row!["PERIOD", format!("{} {}", summary.year_month, summary.status)]);
        table.add_row(row!["POLICY", summary.policy]);
        table.add_row(row!["WORKED", r->format_duration(summary.worked_min)]);
        table.add_row(row!["EXPECTED", r->format_duration(summary.expected_min)]);
        table.add_row(row!["ORDINARY OVERTIME", r->format_signed_minutes(summary.ordinary_overtime_min)]);
        table.add_row(row!["PREMIUM OVERTIME", r->format_signed_minutes(summary.premium_overtime_min)]);
        table.add_row(row!["DEFICIT", r->format_signed_minutes(summary.deficit_min)]);
        table.add_row(row![
            "ABSENCES (J/U)",
            r->format!("{}/{}", summary.justified_absence_days, summary.unjustified_absence_days)
        ]);
        table.add_row(row!["CARRY-OVER", r->format_signed_minutes(summary.carry_over_min)]);
        table.add_row(row!["MANUAL ENTRIES", r->format_signed_minutes(summary.manual_entries_min)]);
        table.add_row(row!["CLOSURE ENTRIES", r->format_signed_minutes(summary.closure_entries_min)]);
        table.add_row(row!["TECHNICAL BALANCE", r->format_signed_minutes(summary.technical_balance_min)]);
        if summary.zero_at_month_end {
            table.add_row(row!["CLOSING ADJUSTMENT", r->format_signed_minutes(summary.closing_adjustment_min)]);
        }
        table.add_row(row!["FINAL BALANCE", r->format_signed_minutes(summary.final_balance_min)]);
        table.add_row(row!["HOURLY RATE", r->format_money(summary.hourly_rate)]);
        table.add_row(row![
            "PAYABLE ORDINARY",
            r->format!("{} ({})", format_money(summary.payable_ordinary_value), format_signed_minutes(summary.payout.payable_ordinary_min))
        ]);
        table.add_row(row![
            "PAYABLE PREMIUM",
            r->format!("{} ({})", format_money(summary.payable_premium_value), format_signed_minutes(summary.payout.payable_premium_min))
        ]);
        table.add_row(row![
            "DEDUCTIBLE",
            r->format!("{} ({})", format_money(summary.deductible_value), format_signed_minutes(summary.payout.deductible_min))
        ]);
        table.add_row(row!["NET PAYOUT", r->format_signed_minutes(summary.payout.net_minutes())]);
        table.printstd();

        Ok(())
    }

    pub fn ledger(entries: &[LedgerEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "MONTH", "KIND", "MINUTES", "NOTE", "CREATED"]);
        for entry in entries {
            table.add_row(row![
                entry.id.unwrap_or(0),
                entry.year_month,
                entry.kind,
                r->format_signed_minutes(entry.minutes),
                entry.note.as_deref().unwrap_or(""),
                entry.created_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn periods(records: &[PeriodRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["MONTH", "STATUS", "UPDATED", "BY"]);
        for record in records {
            table.add_row(row![
                record.year_month,
                record.status,
                record.updated_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default(),
                record.actor.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn fleet(fleet: &FleetSummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "STATUS", "WORKED", "ORDINARY", "PREMIUM", "DEFICIT", "BALANCE", "PAYABLE", "DEDUCTIBLE"]);
        for line in &fleet.lines {
            table.add_row(row![
                line.employee_id,
                line.employee_name,
                line.status,
                r->format_duration(line.worked_min),
                r->format_signed_minutes(line.ordinary_overtime_min),
                r->format_signed_minutes(line.premium_overtime_min),
                r->format_signed_minutes(line.deficit_min),
                r->format_signed_minutes(line.final_balance_min),
                r->format_money(line.payable_value),
                r->format_money(line.deductible_value)
            ]);
        }
        table.add_row(row![
            "TOTAL",
            fleet.totals.employees,
            "",
            r->format_duration(fleet.totals.worked_min),
            r->format_signed_minutes(fleet.totals.ordinary_overtime_min),
            r->format_signed_minutes(fleet.totals.premium_overtime_min),
            r->format_signed_minutes(fleet.totals.deficit_min),
            r->format_signed_minutes(fleet.totals.final_balance_min),
            r->format_money(fleet.totals.payable_value),
            r->format_money(fleet.totals.deductible_value)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn employees(employees: &[Employee]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "SCHEDULE", "SALARY", "REF. HOURS", "ACTIVE"]);
        for employee in employees {
            table.add_row(row![
                employee.id.unwrap_or(0),
                employee.name,
                employee.schedule_id,
                r->format_money(employee.monthly_salary),
                r->employee.reference_hours,
                if employee.active { "yes" } else { "no" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn schedules(schedules: &[WorkSchedule]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "MORNING", "AFTERNOON", "BREAK", "TOLERANCE", "EXPECTED"]);
        for schedule in schedules {
            let window = |entry: &Option<String>, exit: &Option<String>| match (entry, exit) {
                (Some(entry), Some(exit)) => format!("{}-{}", entry, exit),
                _ => String::new(),
            };
            let expected = schedule
                .expected_day()
                .map(|day| format_duration(day.minutes))
                .unwrap_or_else(|_| "?".to_string());
            table.add_row(row![
                schedule.id.unwrap_or(0),
                schedule.name,
                format!("{}-{}", schedule.morning_in, schedule.morning_out),
                window(&schedule.afternoon_in, &schedule.afternoon_out),
                window(&schedule.break_start, &schedule.break_end),
                r->schedule.tolerance,
                r->expected
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn holidays(holidays: &[Holiday]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "DESCRIPTION"]);
        for holiday in holidays {
            table.add_row(row![holiday.date, holiday.description.as_deref().unwrap_or("")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn reasons(reasons: &[Reason]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DESCRIPTION"]);
        for reason in reasons {
            table.add_row(row![reason.id.unwrap_or(0), reason.description]);
        }
        table.printstd();

        Ok(())
    }
}
