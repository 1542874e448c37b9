//! Command-line interface of hourbank.
//!
//! Each subcommand lives in its own module exposing an `Args` struct and a
//! `cmd` function; [`Cli::menu`] parses the arguments and dispatches.

pub mod adjust;
pub mod employee;
pub mod export;
pub mod fleet;
pub mod holiday;
pub mod init;
pub mod period;
pub mod punch;
pub mod reason;
pub mod schedule;
pub mod sum;

use crate::libs::time_units::YearMonth;
use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage work schedules", arg_required_else_help = true)]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Manage employees", arg_required_else_help = true)]
    Employee(employee::EmployeeArgs),
    #[command(about = "Manage the holiday calendar", arg_required_else_help = true)]
    Holiday(holiday::HolidayArgs),
    #[command(about = "Manage absence justification reasons", arg_required_else_help = true)]
    Reason(reason::ReasonArgs),
    #[command(about = "Record punches for a day or import a month", arg_required_else_help = true)]
    Punch(punch::PunchArgs),
    #[command(about = "Monthly time-bank summary of an employee")]
    Sum(sum::SumArgs),
    #[command(about = "Manual ledger adjustments", arg_required_else_help = true)]
    Adjust(adjust::AdjustArgs),
    #[command(about = "Close, reopen and list periods", arg_required_else_help = true)]
    Period(period::PeriodArgs),
    #[command(about = "Monthly roll-up of all active employees")]
    Fleet(fleet::FleetArgs),
    #[command(about = "Export a summary to CSV or JSON", arg_required_else_help = true)]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Schedule(args) => schedule::cmd(args),
            Commands::Employee(args) => employee::cmd(args),
            Commands::Holiday(args) => holiday::cmd(args),
            Commands::Reason(args) => reason::cmd(args),
            Commands::Punch(args) => punch::cmd(args),
            Commands::Sum(args) => sum::cmd(args),
            Commands::Adjust(args) => adjust::cmd(args),
            Commands::Period(args) => period::cmd(args),
            Commands::Fleet(args) => fleet::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// `--zero` / `--no-zero` override of the configured zero-at-month-end setting.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ZeroArgs {
    /// Report the month as zeroed at its end
    #[arg(short, long, conflicts_with = "no_zero")]
    pub zero: bool,
    /// Report the running balance even when zeroing is configured
    #[arg(long)]
    pub no_zero: bool,
}

impl ZeroArgs {
    pub fn resolve(&self, configured: bool) -> bool {
        if self.zero {
            true
        } else if self.no_zero {
            false
        } else {
            configured
        }
    }
}

/// The `--month` argument, defaulting to the current month.
pub(crate) fn month_or_current(month: Option<YearMonth>) -> YearMonth {
    month.unwrap_or_else(|| YearMonth::of(Local::now().date_naive()))
}
