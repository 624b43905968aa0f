//! registro library root.
//! Exposes the CLI parser, the high-level `run()` function and the internal
//! modules (register logic, storage, exports).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cmd, cfg),
        Commands::Db { .. } => commands::db::handle(cmd, cfg),
        Commands::Log { .. } => commands::log::handle(cmd, cfg),
        Commands::Backup { .. } => commands::backup::handle(cmd, cfg),
        Commands::Student { .. } => commands::student::handle(cmd, cfg),
        Commands::Attend { .. } | Commands::Note { .. } => commands::attend::handle(cmd, cfg),
        Commands::Register { .. } | Commands::Verify { .. } => commands::register::handle(cmd, cfg),
        Commands::Lesson { .. } => commands::lesson::handle(cmd, cfg),
        Commands::Activity { .. } => commands::activity::handle(cmd, cfg),
        Commands::DayNote { .. } => commands::day_note::handle(cmd, cfg),
        Commands::Export { .. } => commands::export::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // In test mode the user's configuration file is ignored.
    let mut cfg = if cli.test { Config::default() } else { Config::load()? };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
