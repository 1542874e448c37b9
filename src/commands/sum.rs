use super::{month_or_current, ZeroArgs};
use crate::{
    libs::{aggregator::CompensationPolicy, messages::Message, time_units::YearMonth, timebank::TimeBank, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {
    employee: i64,
    /// YYYY-MM, defaults to the current month
    #[arg(short, long)]
    month: Option<YearMonth>,
    /// Overrides the configured compensation policy
    #[arg(short, long, value_enum)]
    policy: Option<CompensationPolicy>,
    #[command(flatten)]
    zero: ZeroArgs,
    /// Show the per-day breakdown
    #[arg(short, long)]
    days: bool,
}

pub fn cmd(args: SumArgs) -> Result<()> {
    let timebank = TimeBank::open()?;
    let settings = timebank.settings().clone();
    let month = month_or_current(args.month);

    let summary = timebank.monthly_summary(
        args.employee,
        month.year(),
        month.month(),
        args.policy.unwrap_or(settings.policy),
        args.zero.resolve(settings.zero_at_month_end),
    )?;

    if args.days {
        msg_print!(Message::DaysHeader(summary.employee_name.clone(), month.to_string()), true);
        View::days(&summary)?;
    }
    msg_print!(Message::SummaryHeader(summary.employee_name.clone(), month.to_string()), true);
    View::summary(&summary)?;

    Ok(())
}
