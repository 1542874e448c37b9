//! Export of monthly and fleet summaries to CSV or JSON files.
//!
//! CSV output is meant for spreadsheets: a title row, the per-day breakdown
//! (or one line per employee for the fleet) and the totals below it. JSON
//! output is the full serialized structure.

use crate::libs::aggregator::MonthlySummary;
use crate::libs::formatter::{format_money, FormattedDay};
use crate::libs::report::FleetSummary;
use crate::libs::time_units::format_signed_minutes;
use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path, writes `hourbank_<prefix>_<timestamp>.<ext>`
    /// to the working directory.
    pub fn new(format: ExportFormat, prefix: &str, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "hourbank_{}_{}.{}",
                prefix,
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_summary(&self, summary: &MonthlySummary) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_summary_csv(summary),
            ExportFormat::Json => self.write_json(summary),
        }
    }

    pub fn export_fleet(&self, fleet: &FleetSummary) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_fleet_csv(fleet),
            ExportFormat::Json => self.write_json(fleet),
        }
    }

    fn write_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_summary_csv(&self, summary: &MonthlySummary) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record([
            format!("Time bank - {} - {}", summary.employee_name, summary.year_month),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ])?;
        wtr.write_record(["Date", "Day", "Expected", "Worked", "Category", "Impact"])?;
        for day in summary.days.iter().map(FormattedDay::from) {
            wtr.write_record([day.date, day.day_type, day.expected, day.worked, day.category, day.impact])?;
        }

        wtr.write_record(["", "", "", "", "", ""])?;
        let totals = [
            ("Worked", format_signed_minutes(summary.worked_min)),
            ("Expected", format_signed_minutes(summary.expected_min)),
            ("Ordinary overtime", format_signed_minutes(summary.ordinary_overtime_min)),
            ("Premium overtime", format_signed_minutes(summary.premium_overtime_min)),
            ("Deficit", format_signed_minutes(summary.deficit_min)),
            ("Carry-over", format_signed_minutes(summary.carry_over_min)),
            ("Manual entries", format_signed_minutes(summary.manual_entries_min)),
            ("Closure entries", format_signed_minutes(summary.closure_entries_min)),
            ("Technical balance", format_signed_minutes(summary.technical_balance_min)),
            ("Closing adjustment", format_signed_minutes(summary.closing_adjustment_min)),
            ("Final balance", format_signed_minutes(summary.final_balance_min)),
            ("Payable ordinary", format_money(summary.payable_ordinary_value)),
            ("Payable premium", format_money(summary.payable_premium_value)),
            ("Deductible", format_money(summary.deductible_value)),
        ];
        for (label, value) in totals {
            wtr.write_record([label, value.as_str(), "", "", "", ""])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_fleet_csv(&self, fleet: &FleetSummary) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        wtr.write_record(["Employee", "Name", "Status", "Worked", "Ordinary", "Premium", "Deficit", "Balance", "Payable", "Deductible"])?;
        for line in &fleet.lines {
            wtr.write_record([
                line.employee_id.to_string(),
                line.employee_name.clone(),
                line.status.to_string(),
                format_signed_minutes(line.worked_min),
                format_signed_minutes(line.ordinary_overtime_min),
                format_signed_minutes(line.premium_overtime_min),
                format_signed_minutes(line.deficit_min),
                format_signed_minutes(line.final_balance_min),
                format_money(line.payable_value),
                format_money(line.deductible_value),
            ])?;
        }
        wtr.write_record([
            "TOTAL".to_string(),
            fleet.totals.employees.to_string(),
            String::new(),
            format_signed_minutes(fleet.totals.worked_min),
            format_signed_minutes(fleet.totals.ordinary_overtime_min),
            format_signed_minutes(fleet.totals.premium_overtime_min),
            format_signed_minutes(fleet.totals.deficit_min),
            format_signed_minutes(fleet.totals.final_balance_min),
            format_money(fleet.totals.payable_value),
            format_money(fleet.totals.deductible_value),
        ])?;

        wtr.flush()?;
        Ok(())
    }
}
