//! Configuration initialization command.
//!
//! Writes the effective configuration (file values, environment overrides and
//! defaults merged) to `config.json`, or removes it with `--delete`.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove existing configuration instead of creating new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs, config: Config) -> Result<()> {
    if init_args.delete {
        match Config::delete()? {
            Some(path) => msg_success!(Message::ConfigDeleted(path.display().to_string())),
            None => msg_warning!(Message::ConfigFileNotFound),
        }
        return Ok(());
    }

    let path = config.save()?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}
