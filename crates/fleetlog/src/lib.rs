//! `fleetlog` - In-memory vehicle fleet tracking with derived reminders
//!
//! This library provides the core functionality for registering cars, logging
//! maintenance and fuel events, and computing derived views over them:
//! average fuel consumption and upcoming-service reminders.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod logging;
pub mod record;

pub use config::Config;
pub use engine::{
    average_fuel_consumption, derive_reminders, derive_reminders_with, fuel_price_trend,
    PricePoint, Reminder, ReminderWindows, Severity,
};
pub use error::{Error, Result};
pub use fleet::{Fleet, FleetStats, Snapshot};
pub use logging::init_logging;
pub use record::{
    Car, CarId, FuelRecord, MaintenanceRecord, NewCar, NewFuel, NewMaintenance, RecordId,
};
