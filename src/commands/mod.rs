//! Command-line interface.
//!
//! `serve` is the main entry point; `init` and `migrations` are maintenance
//! helpers. Configuration is loaded once here (file, then environment) and
//! handed to the selected command.

pub mod init;
pub mod migrations;
pub mod serve;

use crate::libs::{config::Config, logging};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the web server")]
    Serve(serve::ServeArgs),
    #[command(about = "Write the configuration file")]
    Init(init::InitArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let config = Config::read()?.with_env_overrides()?;
        logging::init(config.log_level.as_deref())?;

        match cli.command.unwrap_or(Commands::Serve(serve::ServeArgs::default())) {
            Commands::Serve(args) => serve::cmd(args, config).await,
            Commands::Init(args) => init::cmd(args, config),
            Commands::Migrations(args) => migrations::cmd(args, config),
        }
    }
}
