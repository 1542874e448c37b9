use super::month_or_current;
use crate::{
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
        time_units::YearMonth,
        timebank::TimeBank,
    },
    msg_success,
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportData {
    /// Monthly summary of one employee (requires --employee)
    Summary,
    /// Roll-up of all active employees
    Fleet,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    data: ExportData,
    #[arg(short, long)]
    employee: Option<i64>,
    #[arg(short, long)]
    month: Option<YearMonth>,
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let timebank = TimeBank::open()?;
    let settings = timebank.settings().clone();
    let month = month_or_current(args.month);

    let exporter = match args.data {
        ExportData::Summary => {
            let employee = args
                .employee
                .ok_or_else(|| crate::msg_error_anyhow!(Message::ExportEmployeeRequired))?;
            let summary = timebank.monthly_summary(
                employee,
                month.year(),
                month.month(),
                settings.policy,
                settings.zero_at_month_end,
            )?;
            let exporter = Exporter::new(args.format, &format!("{}_{}", employee, month), args.output);
            exporter.export_summary(&summary)?;
            exporter
        }
        ExportData::Fleet => {
            let fleet = timebank.fleet_summary(month.year(), month.month(), settings.policy, settings.zero_at_month_end)?;
            let exporter = Exporter::new(args.format, &format!("fleet_{}", month), args.output);
            exporter.export_fleet(&fleet)?;
            exporter
        }
    };

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
