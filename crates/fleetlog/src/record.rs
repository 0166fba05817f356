//! Core entity types for fleetlog.
//!
//! This module defines the three record collections everything else operates
//! on: registered cars, maintenance records, and fuel records. Records are
//! immutable once created; the only post-creation mutation anywhere is a
//! car's odometer mileage, which is only ever raised by record insertion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a registered car.
pub type CarId = u64;

/// Identifier of a maintenance or fuel record.
pub type RecordId = u64;

/// A registered vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier (assigned by the fleet store).
    pub id: CarId,

    /// Manufacturer, e.g. "Toyota".
    pub brand: String,

    /// Model name, e.g. "Camry".
    pub model: String,

    /// Model year.
    pub year: u16,

    /// License plate.
    pub license_plate: String,

    /// Current odometer reading in km.
    ///
    /// Monotonically non-decreasing: raised by maintenance and fuel record
    /// insertion when a record carries a higher reading, never lowered.
    pub mileage: u32,
}

impl Car {
    /// Human-readable label, "brand model".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// A logged service event.
///
/// Optionally carries a due-date and/or due-mileage for the next service,
/// which drives reminder derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Unique identifier (assigned by the fleet store).
    pub id: RecordId,

    /// The car this service was performed on.
    pub car_id: CarId,

    /// Date of service.
    pub date: NaiveDate,

    /// Free-text service type, e.g. "Oil Change".
    pub service_type: String,

    /// Odometer reading at service time, in km.
    pub mileage: u32,

    /// Cost in whole currency units.
    pub cost: i64,

    /// Odometer reading at which the next service is due, if scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_mileage: Option<u32>,

    /// Date the next service is due, if scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_date: Option<NaiveDate>,
}

/// A logged refueling event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    /// Unique identifier (assigned by the fleet store).
    pub id: RecordId,

    /// The car that was refueled.
    pub car_id: CarId,

    /// Date of the fill.
    pub date: NaiveDate,

    /// Volume filled, in liters.
    pub liters: f64,

    /// Cost in whole currency units.
    pub cost: i64,

    /// Odometer reading at fill time, in km.
    pub mileage: u32,
}

impl FuelRecord {
    /// Price paid per liter, rounded to the nearest whole currency unit.
    ///
    /// Returns `None` when the recorded volume is not positive.
    #[must_use]
    pub fn price_per_liter(&self) -> Option<i64> {
        if self.liters > 0.0 {
            Some((self.cost as f64 / self.liters).round() as i64)
        } else {
            None
        }
    }
}

/// Parameters for registering a new car.
///
/// The fleet store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCar {
    /// Manufacturer.
    pub brand: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: u16,
    /// License plate.
    pub license_plate: String,
    /// Current odometer reading in km.
    pub mileage: u32,
}

/// Parameters for logging a new maintenance record.
#[derive(Debug, Clone)]
pub struct NewMaintenance {
    /// The car the service was performed on.
    pub car_id: CarId,
    /// Date of service.
    pub date: NaiveDate,
    /// Free-text service type.
    pub service_type: String,
    /// Odometer reading at service time, in km.
    pub mileage: u32,
    /// Cost in whole currency units.
    pub cost: i64,
    /// Odometer reading at which the next service is due, if scheduled.
    pub next_mileage: Option<u32>,
    /// Date the next service is due, if scheduled.
    pub next_date: Option<NaiveDate>,
}

/// Parameters for logging a new fuel record.
#[derive(Debug, Clone)]
pub struct NewFuel {
    /// The car that was refueled.
    pub car_id: CarId,
    /// Date of the fill.
    pub date: NaiveDate,
    /// Volume filled, in liters.
    pub liters: f64,
    /// Cost in whole currency units.
    pub cost: i64,
    /// Odometer reading at fill time, in km.
    pub mileage: u32,
}
