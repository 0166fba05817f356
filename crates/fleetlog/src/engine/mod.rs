//! Derived-data engine for fleetlog.
//!
//! Pure functions that transform the raw entity collections into derived
//! views: average fuel consumption and upcoming-service reminders. The engine
//! holds no state; every call is a fresh computation over caller-supplied
//! collections, and "now" is always an explicit parameter.

pub mod consumption;
pub mod reminders;

pub use consumption::{average_fuel_consumption, fuel_price_trend, PricePoint};
pub use reminders::{
    derive_reminders, derive_reminders_with, Reminder, ReminderWindows, Severity,
};
