use crate::{
    db::punches::{DailyPunchRecord, Occurrence, PunchPair},
    libs::{import::read_punch_csv, messages::Message, time_units::YearMonth, timebank::TimeBank},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::{Args, Subcommand};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PunchArgs {
    #[command(subcommand)]
    command: PunchCommand,
}

#[derive(Debug, Subcommand)]
enum PunchCommand {
    /// Record (or replace) one day of an employee
    Day {
        employee: i64,
        /// YYYY-MM-DD
        date: NaiveDate,
        /// HH:MM-HH:MM
        #[arg(short, long)]
        morning: Option<String>,
        /// HH:MM-HH:MM
        #[arg(short, long)]
        afternoon: Option<String>,
        /// HH:MM-HH:MM
        #[arg(short, long)]
        extra: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Occurrence::Normal)]
        occurrence: Occurrence,
        /// Justification reason id
        #[arg(short, long)]
        reason: Option<i64>,
        #[arg(short, long)]
        note: Option<String>,
        /// Treat the date as a holiday for this employee
        #[arg(long)]
        holiday: bool,
    },
    /// Import a whole month from CSV in a single batch
    Import {
        employee: i64,
        file: PathBuf,
        /// Month the file must cover (checked against the rows)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
}

pub fn cmd(args: PunchArgs) -> Result<()> {
    let mut timebank = TimeBank::open()?;

    match args.command {
        PunchCommand::Day {
            employee,
            date,
            morning,
            afternoon,
            extra,
            occurrence,
            reason,
            note,
            holiday,
        } => {
            let mut record = DailyPunchRecord::new(employee, date).with_occurrence(occurrence);
            record.morning = pair("morning", morning)?;
            record.afternoon = pair("afternoon", afternoon)?;
            record.extra = pair("extra", extra)?;
            record.reason_id = reason;
            record.note = note;
            record.holiday = holiday;

            timebank.save_day_records(employee, date.year(), date.month(), &[record])?;
            msg_success!(Message::DaySaved(employee, date.to_string()));
        }
        PunchCommand::Import { employee, file, month } => {
            let batch = read_punch_csv(File::open(&file)?, employee)?;
            if let Some(month) = month {
                if month != batch.year_month {
                    msg_bail_anyhow!(Message::ImportMonthMismatch(month.to_string(), batch.year_month.to_string()));
                }
            }
            let ym = batch.year_month;
            timebank.save_day_records(employee, ym.year(), ym.month(), &batch.records)?;
            msg_success!(Message::PunchesImported(batch.records.len(), employee, ym.to_string()));
        }
    }

    Ok(())
}

fn pair(field: &str, value: Option<String>) -> Result<PunchPair> {
    Ok(match value {
        Some(range) => PunchPair::parse_range(field, &range)?,
        None => PunchPair::default(),
    })
}
