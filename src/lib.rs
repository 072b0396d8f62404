//! gatesheet library root.
//! Exposes the CLI parser, the high-level run() function and the pipeline
//! modules used by the binary and the integration tests.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands as cmd;

    match &cli.command {
        Commands::Init => cmd::init::handle(cli),
        Commands::Config { .. } => cmd::config::handle(&cli.command, cfg),
        Commands::Pending => cmd::pending::handle(cfg),
        Commands::Process { .. } => cmd::process::handle(&cli.command, cfg),
        Commands::Import { .. } => cmd::import::handle(&cli.command, cfg),
        Commands::Extract => cmd::extract::handle(cfg),
        Commands::Aggregate => cmd::aggregate::handle(cfg),
        Commands::Rebuild => cmd::rebuild::handle(cfg),
        Commands::Render => cmd::render::handle(cfg),
        Commands::Show { .. } => cmd::show::handle(&cli.command, cfg),
        Commands::Export { .. } => cmd::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cmd::log::handle(&cli.command, cfg),
    }
}

/// Apply the global command-line overrides on top of the loaded config.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(db) = &cli.db {
        cfg.database = db.clone();
    }
    if let Some(folder) = &cli.folder {
        cfg.gate_folder = folder.clone();
    }
    if let Some(report) = &cli.report {
        cfg.report_file = report.clone();
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg);

    dispatch(&cli, &cfg)
}
