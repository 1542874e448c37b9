use crate::{
    db::{
        db::Db,
        holidays::{Holiday, Holidays},
    },
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct HolidayArgs {
    #[command(subcommand)]
    command: HolidayCommand,
}

#[derive(Debug, Subcommand)]
enum HolidayCommand {
    /// Register a holiday (YYYY-MM-DD)
    Add {
        date: NaiveDate,
        #[arg(short, long)]
        description: Option<String>,
    },
    List {
        /// Defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },
    Delete {
        date: NaiveDate,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: HolidayArgs) -> Result<()> {
    let db = Db::new()?;
    let holidays = Holidays::new(&db.conn);

    match args.command {
        HolidayCommand::Add { date, description } => {
            holidays.insert(&Holiday::new(date, description.as_deref()))?;
            msg_success!(Message::HolidayAdded(date.to_string()));
        }
        HolidayCommand::List { year } => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let list = holidays.fetch_year(year)?;
            if list.is_empty() {
                msg_info!(Message::NoHolidaysFound(year));
                return Ok(());
            }
            msg_print!(Message::HolidaysHeader(year), true);
            View::holidays(&list)?;
        }
        HolidayCommand::Delete { date, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteHoliday(date.to_string()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            holidays.delete(date)?;
            msg_success!(Message::HolidayDeleted(date.to_string()));
        }
    }

    Ok(())
}
