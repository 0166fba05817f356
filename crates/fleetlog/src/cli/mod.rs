//! Command-line interface for fleetlog.
//!
//! This module provides the CLI structure and command handlers for the
//! `fleetlog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCarCommand, AddCommand, AddFuelCommand, AddServiceCommand, CarsCommand, ConfigCommand,
    ConsumptionCommand, RemindersCommand, ShowCommand, StatusCommand,
};

/// fleetlog - Track your vehicle fleet from the command line
///
/// Registers cars, logs maintenance and fuel events, and computes upcoming
/// service reminders and consumption statistics over them. State lives in
/// memory for the duration of a command; pass a snapshot with `--input` to
/// work over previously exported collections.
#[derive(Debug, Parser)]
#[command(name = "fleetlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fleet snapshot (JSON) to load
    #[arg(short, long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Start from the built-in sample fleet instead of a snapshot
    #[arg(long, global = true, conflicts_with = "input")]
    pub sample: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all cars in the fleet
    Cars(CarsCommand),

    /// Show one car in detail
    Show(ShowCommand),

    /// Register a car or log a maintenance/fuel record
    #[command(subcommand)]
    Add(AddCommand),

    /// Show upcoming service reminders
    Reminders(RemindersCommand),

    /// Show average fuel consumption for one car
    Consumption(ConsumptionCommand),

    /// Show fleet statistics
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
