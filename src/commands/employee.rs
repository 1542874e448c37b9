use crate::{
    db::{
        db::Db,
        employees::{Employee, Employees},
        schedules::Schedules,
    },
    libs::{config::Config, error::TimeBankError, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
enum EmployeeCommand {
    /// Register an employee on a schedule
    Add {
        name: String,
        #[arg(short, long)]
        schedule: i64,
        #[arg(long, default_value_t = 0.0)]
        salary: f64,
        /// Monthly hours the salary covers; defaults to the configured value
        #[arg(long)]
        reference_hours: Option<i64>,
    },
    /// Mark an employee inactive so the fleet roll-up skips them
    Deactivate { id: i64 },
    List {
        /// Include inactive employees
        #[arg(short, long)]
        all: bool,
    },
}

pub fn cmd(args: EmployeeArgs) -> Result<()> {
    let db = Db::new()?;
    let employees = Employees::new(&db.conn);

    match args.command {
        EmployeeCommand::Add {
            name,
            schedule,
            salary,
            reference_hours,
        } => {
            if Schedules::new(&db.conn).get(schedule)?.is_none() {
                return Err(TimeBankError::ScheduleNotFound(schedule).into());
            }
            let reference_hours = match reference_hours {
                Some(hours) => hours,
                None => Config::read()?.engine().default_reference_hours,
            };
            let employee = Employee::new(&name, schedule, salary).with_reference_hours(reference_hours);
            let id = employees.insert(&employee)?;
            msg_success!(Message::EmployeeCreated(name, id));
        }
        EmployeeCommand::Deactivate { id } => {
            let mut employee = employees.require(id)?;
            employee.active = false;
            employees.update(&employee)?;
            msg_success!(Message::EmployeeDeactivated(employee.name));
        }
        EmployeeCommand::List { all } => {
            let list = employees.list(!all)?;
            if list.is_empty() {
                msg_info!(Message::NoEmployeesFound);
                return Ok(());
            }
            msg_print!(Message::EmployeesHeader, true);
            View::employees(&list)?;
        }
    }

    Ok(())
}
