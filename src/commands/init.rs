use crate::{
    libs::{config::Config, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Print the current configuration instead of running the wizard
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.show {
        let config = Config::read()?;
        msg_print!(Message::ConfigCurrent(serde_json::to_string_pretty(&config)?));
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
