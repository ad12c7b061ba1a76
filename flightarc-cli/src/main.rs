//! FlightArc CLI - Command-line interface
//!
//! Thin shell over the `flightarc` library: inspect great-circle routes,
//! replay a flight feed through the playback clock, and manage the
//! configuration file.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::route::RouteArgs;
use commands::simulate::SimulateArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Debug, Parser)]
#[command(name = "flightarc", version, about = "Great-circle flight path playback")]
struct Cli {
    /// Configuration file (default: ~/.flightarc/config.ini)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level or filter directive, overriding logging.level
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the great-circle way-points between two airports
    Route(RouteArgs),

    /// Replay a flight feed through the playback clock
    Simulate(SimulateArgs),

    /// View or modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let runner = CliRunner::new(cli.config.clone(), cli.log_level.as_deref())?;
    runner.log_startup();

    match cli.command {
        Commands::Route(args) => commands::route::run(&runner, args),
        Commands::Simulate(args) => commands::simulate::run(&runner, args),
        Commands::Config { command } => commands::config::run(runner.config_path(), command),
    }
}
