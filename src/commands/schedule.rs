use crate::{
    db::{
        db::Db,
        punches::PunchPair,
        schedules::{Schedules, WorkSchedule},
    },
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    command: ScheduleCommand,
}

#[derive(Debug, Subcommand)]
enum ScheduleCommand {
    /// Register a schedule
    Add {
        name: String,
        /// Morning window, HH:MM-HH:MM
        #[arg(short, long)]
        morning: String,
        /// Afternoon window, HH:MM-HH:MM
        #[arg(short, long)]
        afternoon: Option<String>,
        /// Break window subtracted where it overlaps the work windows
        #[arg(short, long = "break")]
        break_window: Option<String>,
        /// Minutes of difference ignored on ordinary days
        #[arg(short, long, default_value_t = 0)]
        tolerance: i64,
    },
    List,
}

pub fn cmd(args: ScheduleArgs) -> Result<()> {
    let db = Db::new()?;
    let schedules = Schedules::new(&db.conn);

    match args.command {
        ScheduleCommand::Add {
            name,
            morning,
            afternoon,
            break_window,
            tolerance,
        } => {
            let (morning_in, morning_out) = window("morning", &morning)?;
            let mut schedule = WorkSchedule::new(&name, &morning_in, &morning_out).with_tolerance(tolerance);
            if let Some(afternoon) = afternoon {
                let (entry, exit) = window("afternoon", &afternoon)?;
                schedule = schedule.with_afternoon(&entry, &exit);
            }
            if let Some(break_window) = break_window {
                let (start, end) = window("break", &break_window)?;
                schedule = schedule.with_break(&start, &end);
            }

            let id = schedules.insert(&schedule)?;
            msg_success!(Message::ScheduleCreated(name, id));
        }
        ScheduleCommand::List => {
            let list = schedules.list()?;
            if list.is_empty() {
                msg_info!(Message::NoSchedulesFound);
                return Ok(());
            }
            msg_print!(Message::SchedulesHeader, true);
            View::schedules(&list)?;
        }
    }

    Ok(())
}

fn window(field: &str, value: &str) -> Result<(String, String)> {
    let pair = PunchPair::parse_range(field, value)?;
    Ok((pair.entry.unwrap_or_default(), pair.exit.unwrap_or_default()))
}
