use crate::{
    db::{db::Db, reasons::Reasons},
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ReasonArgs {
    #[command(subcommand)]
    command: ReasonCommand,
}

#[derive(Debug, Subcommand)]
enum ReasonCommand {
    Add { description: String },
    List,
}

pub fn cmd(args: ReasonArgs) -> Result<()> {
    let db = Db::new()?;
    let reasons = Reasons::new(&db.conn);

    match args.command {
        ReasonCommand::Add { description } => {
            let id = reasons.insert(&description)?;
            msg_success!(Message::ReasonCreated(description, id));
        }
        ReasonCommand::List => {
            let list = reasons.list()?;
            if list.is_empty() {
                msg_info!(Message::NoReasonsFound);
                return Ok(());
            }
            msg_print!(Message::ReasonsHeader, true);
            View::reasons(&list)?;
        }
    }

    Ok(())
}
