use super::{month_or_current, ZeroArgs};
use crate::{
    libs::{aggregator::CompensationPolicy, messages::Message, time_units::YearMonth, timebank::TimeBank, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct FleetArgs {
    #[arg(short, long)]
    month: Option<YearMonth>,
    #[arg(short, long, value_enum)]
    policy: Option<CompensationPolicy>,
    #[command(flatten)]
    zero: ZeroArgs,
}

pub fn cmd(args: FleetArgs) -> Result<()> {
    let timebank = TimeBank::open()?;
    let settings = timebank.settings().clone();
    let month = month_or_current(args.month);

    let fleet = timebank.fleet_summary(
        month.year(),
        month.month(),
        args.policy.unwrap_or(settings.policy),
        args.zero.resolve(settings.zero_at_month_end),
    )?;
    if fleet.lines.is_empty() {
        msg_info!(Message::NoEmployeesFound);
        return Ok(());
    }

    msg_print!(Message::FleetHeader(month.to_string()), true);
    View::fleet(&fleet)?;
    Ok(())
}
