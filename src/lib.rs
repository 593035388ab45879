//! rcheckin library root.
//! Exposes the CLI parser, the high-level run() function, the action
//! workflow and its service seams.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;
pub mod workflow;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::action_target::ActionTarget;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Checkin(args) => {
            cli::commands::action::handle(args, ActionTarget::CheckIn, cfg).await
        }
        Commands::Checkout(args) => {
            cli::commands::action::handle(args, ActionTarget::CheckOut, cfg).await
        }
        Commands::Locate { .. } => cli::commands::locate::handle(&cli.command, cfg).await,
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::History { .. } => cli::commands::history::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Clock { .. } => cli::commands::clock::handle(&cli.command).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // load the config once, then apply command-line overrides
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }
    if let Some(server) = &cli.server {
        cfg.server_url = server.clone();
    }

    dispatch(&cli, &cfg).await
}
