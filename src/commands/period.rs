use super::month_or_current;
use crate::{
    libs::{messages::Message, time_units::YearMonth, timebank::TimeBank, view::View},
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct PeriodArgs {
    #[command(subcommand)]
    command: PeriodCommand,
}

#[derive(Debug, Subcommand)]
enum PeriodCommand {
    /// Close an open month, locking its punches and adjustments
    Close {
        employee: i64,
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Reopen a closed month for edits
    Reopen {
        employee: i64,
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Months of a year that were opened at least once
    List {
        employee: i64,
        #[arg(short, long)]
        year: Option<i32>,
    },
}

pub fn cmd(args: PeriodArgs) -> Result<()> {
    let mut timebank = TimeBank::open()?;

    match args.command {
        PeriodCommand::Close { employee, month } => {
            let month = month_or_current(month);
            let record = timebank.close_period(employee, month.year(), month.month())?;
            msg_success!(Message::PeriodClosed(employee, record.year_month.to_string()));
        }
        PeriodCommand::Reopen { employee, month } => {
            let month = month_or_current(month);
            let record = timebank.reopen_period(employee, month.year(), month.month())?;
            msg_success!(Message::PeriodReopened(employee, record.year_month.to_string()));
            msg_warning!(Message::ReopenKeepsPostings);
        }
        PeriodCommand::List { employee, year } => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let records = timebank.list_available_periods(employee, year)?;
            if records.is_empty() {
                msg_info!(Message::NoPeriodsFound(employee, year));
                return Ok(());
            }
            msg_print!(Message::PeriodsHeader(employee, year), true);
            View::periods(&records)?;
        }
    }

    Ok(())
}
