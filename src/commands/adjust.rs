use crate::{
    libs::{messages::Message, time_units::YearMonth, timebank::TimeBank, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct AdjustArgs {
    #[command(subcommand)]
    command: AdjustCommand,
}

#[derive(Debug, Subcommand)]
enum AdjustCommand {
    /// Credit (positive) or debit (negative) minutes in the month of `date`
    Add {
        employee: i64,
        /// YYYY-MM-DD
        date: NaiveDate,
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete a manual entry
    Remove {
        entry: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Ledger entries of an employee
    List {
        employee: i64,
        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
}

pub fn cmd(args: AdjustArgs) -> Result<()> {
    let mut timebank = TimeBank::open()?;

    match args.command {
        AdjustCommand::Add {
            employee,
            date,
            minutes,
            note,
        } => {
            let entry = timebank.add_manual_adjustment(employee, date, minutes, note.as_deref())?;
            msg_success!(Message::AdjustmentAdded(entry.id.unwrap_or(0), entry.year_month.to_string()));
        }
        AdjustCommand::Remove { entry, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmRemoveAdjustment(entry).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            let removed = timebank.remove_manual_adjustment(entry)?;
            msg_success!(Message::AdjustmentRemoved(entry, removed.year_month.to_string()));
        }
        AdjustCommand::List { employee, month } => {
            let entries = timebank.ledger_entries(employee, month)?;
            if entries.is_empty() {
                msg_info!(Message::NoLedgerEntries);
                return Ok(());
            }
            msg_print!(Message::LedgerHeader(employee), true);
            View::ledger(&entries)?;
        }
    }

    Ok(())
}
