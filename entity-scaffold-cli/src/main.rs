//! entity-scaffold CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use entity_scaffold::config::ScaffoldConfig;
use entity_scaffold::observability;
use entity_scaffold_cli_lib::{GenerateCommand, ScaffoldCommand, ValidateCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "entity-scaffold")]
#[command(version)]
#[command(about = "Generate SQL schema, sqlc queries and Go DTOs from an entity", long_about = None)]
struct Cli {
    /// Configuration file layered over the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate artifacts from an entity JSON document
    Generate(GenerateCommand),
    /// Generate artifacts from a name and field specs
    Scaffold(ScaffoldCommand),
    /// Validate an entity JSON document
    Validate(ValidateCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        ScaffoldConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.logging.level = observability::effective_level(&config.logging, cli.verbose);
    observability::init(&config.logging)?;

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(&config)?,
        Commands::Scaffold(cmd) => cmd.execute(&config)?,
        Commands::Validate(cmd) => cmd.execute(&config)?,
    }

    Ok(())
}
