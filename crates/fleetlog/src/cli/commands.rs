//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and their
//! conversions into the store's insertion parameter types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::record::{CarId, NewCar, NewFuel, NewMaintenance};

/// Cars command arguments.
#[derive(Debug, Args)]
pub struct CarsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Id of the car to show
    pub car: CarId,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Record insertion commands.
#[derive(Debug, Subcommand)]
pub enum AddCommand {
    /// Register a new car
    Car(AddCarCommand),

    /// Log a maintenance record
    Service(AddServiceCommand),

    /// Log a fuel record
    Fuel(AddFuelCommand),
}

impl AddCommand {
    /// Where the updated snapshot should be written, if anywhere.
    #[must_use]
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Self::Car(cmd) => cmd.output.as_ref(),
            Self::Service(cmd) => cmd.output.as_ref(),
            Self::Fuel(cmd) => cmd.output.as_ref(),
        }
    }
}

/// Add-car command arguments.
#[derive(Debug, Args)]
pub struct AddCarCommand {
    /// Manufacturer, e.g. "Toyota"
    #[arg(long)]
    pub brand: String,

    /// Model name, e.g. "Camry"
    #[arg(long)]
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: u16,

    /// License plate
    #[arg(long = "plate")]
    pub license_plate: String,

    /// Current odometer reading in km
    #[arg(long, default_value_t = 0)]
    pub mileage: u32,

    /// Write the updated snapshot here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl AddCarCommand {
    /// Build the insertion parameters.
    #[must_use]
    pub fn record(&self) -> NewCar {
        NewCar {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            license_plate: self.license_plate.clone(),
            mileage: self.mileage,
        }
    }
}

/// Add-service command arguments.
#[derive(Debug, Args)]
pub struct AddServiceCommand {
    /// Id of the car the service was performed on
    #[arg(long)]
    pub car: CarId,

    /// Date of service (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Type of service performed, e.g. "Oil Change"
    #[arg(long, value_name = "TYPE")]
    pub service_type: String,

    /// Odometer reading at service time, in km
    #[arg(long)]
    pub mileage: u32,

    /// Cost in whole currency units
    #[arg(long)]
    pub cost: i64,

    /// Odometer reading that schedules the next-service reminder
    #[arg(long)]
    pub next_mileage: Option<u32>,

    /// Date that schedules the next-service reminder
    #[arg(long)]
    pub next_date: Option<NaiveDate>,

    /// Write the updated snapshot here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl AddServiceCommand {
    /// Build the insertion parameters, defaulting the date to `today`.
    #[must_use]
    pub fn record(&self, today: NaiveDate) -> NewMaintenance {
        NewMaintenance {
            car_id: self.car,
            date: self.date.unwrap_or(today),
            service_type: self.service_type.clone(),
            mileage: self.mileage,
            cost: self.cost,
            next_mileage: self.next_mileage,
            next_date: self.next_date,
        }
    }
}

/// Add-fuel command arguments.
#[derive(Debug, Args)]
pub struct AddFuelCommand {
    /// Id of the car that was refueled
    #[arg(long)]
    pub car: CarId,

    /// Date of the fill (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Volume filled, in liters
    #[arg(long)]
    pub liters: f64,

    /// Total cost in whole currency units
    #[arg(long)]
    pub cost: i64,

    /// Odometer reading at fill time, in km
    #[arg(long)]
    pub mileage: u32,

    /// Write the updated snapshot here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl AddFuelCommand {
    /// Build the insertion parameters, defaulting the date to `today`.
    #[must_use]
    pub fn record(&self, today: NaiveDate) -> NewFuel {
        NewFuel {
            car_id: self.car,
            date: self.date.unwrap_or(today),
            liters: self.liters,
            cost: self.cost,
            mileage: self.mileage,
        }
    }
}

/// Reminders command arguments.
#[derive(Debug, Args)]
pub struct RemindersCommand {
    /// Evaluate reminders as of this date (defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Consumption command arguments.
#[derive(Debug, Args)]
pub struct ConsumptionCommand {
    /// Id of the car to compute consumption for
    pub car: CarId,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
