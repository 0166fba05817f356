//! In-memory fleet store.
//!
//! This module owns the canonical entity collections for a session: cars,
//! maintenance records, and fuel records. It assigns record ids, applies the
//! mileage ratchet on record insertion, and offers convenience views over
//! the derivation engine. Nothing here touches disk; snapshots exist so a
//! presentation layer can move collections in and out as JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{average_fuel_consumption, derive_reminders_with, Reminder, ReminderWindows};
use crate::error::{Error, Result};
use crate::record::{
    Car, CarId, FuelRecord, MaintenanceRecord, NewCar, NewFuel, NewMaintenance, RecordId,
};

/// In-memory store for the three entity collections.
///
/// Ids are assigned from a single monotonic counter, so they are unique
/// across all collections. Records are append-only; the only mutation after
/// insertion is the owning car's mileage ratchet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    cars: Vec<Car>,
    maintenance: Vec<MaintenanceRecord>,
    fuel: Vec<FuelRecord>,
    /// Last id handed out; 0 means none yet.
    last_id: u64,
}

impl Fleet {
    /// Create an empty fleet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fleet seeded with the demo car.
    #[must_use]
    pub fn sample() -> Self {
        let mut fleet = Self::new();
        fleet.add_car(NewCar {
            brand: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2021,
            license_plate: "123ABC01".to_string(),
            mileage: 45_000,
        });
        fleet
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Register a new car and return its assigned id.
    pub fn add_car(&mut self, new: NewCar) -> CarId {
        let id = self.next_id();
        let car = Car {
            id,
            brand: new.brand,
            model: new.model,
            year: new.year,
            license_plate: new.license_plate,
            mileage: new.mileage,
        };
        debug!("registered car {id}: {}", car.label());
        self.cars.push(car);
        id
    }

    /// Log a maintenance record and return its assigned id.
    ///
    /// Raises the car's mileage if the record carries a higher reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCar`] if the record references a car that is
    /// not registered.
    pub fn add_maintenance(&mut self, new: NewMaintenance) -> Result<RecordId> {
        self.reconcile_mileage(new.car_id, new.mileage)?;
        let id = self.next_id();
        self.maintenance.push(MaintenanceRecord {
            id,
            car_id: new.car_id,
            date: new.date,
            service_type: new.service_type,
            mileage: new.mileage,
            cost: new.cost,
            next_mileage: new.next_mileage,
            next_date: new.next_date,
        });
        debug!("logged maintenance record {id} for car {}", new.car_id);
        Ok(id)
    }

    /// Log a fuel record and return its assigned id.
    ///
    /// Raises the car's mileage if the record carries a higher reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCar`] if the record references a car that is
    /// not registered.
    pub fn add_fuel(&mut self, new: NewFuel) -> Result<RecordId> {
        self.reconcile_mileage(new.car_id, new.mileage)?;
        let id = self.next_id();
        self.fuel.push(FuelRecord {
            id,
            car_id: new.car_id,
            date: new.date,
            liters: new.liters,
            cost: new.cost,
            mileage: new.mileage,
        });
        debug!("logged fuel record {id} for car {}", new.car_id);
        Ok(id)
    }

    /// Raise a car's stored mileage to `mileage` if the new reading is
    /// higher. One-way ratchet: a lower reading leaves the car unchanged.
    fn reconcile_mileage(&mut self, car_id: CarId, mileage: u32) -> Result<()> {
        let car = self
            .cars
            .iter_mut()
            .find(|c| c.id == car_id)
            .ok_or_else(|| Error::unknown_car(car_id))?;
        if mileage > car.mileage {
            debug!(
                "raising mileage of car {car_id} from {} to {mileage}",
                car.mileage
            );
            car.mileage = mileage;
        }
        Ok(())
    }

    /// Get a car by id.
    #[must_use]
    pub fn car(&self, id: CarId) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }

    /// Get a car by id, erroring when it is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCar`] if no car has the given id.
    pub fn require_car(&self, id: CarId) -> Result<&Car> {
        self.car(id).ok_or_else(|| Error::unknown_car(id))
    }

    /// All registered cars, in registration order.
    #[must_use]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// All maintenance records, in insertion order.
    #[must_use]
    pub fn maintenance(&self) -> &[MaintenanceRecord] {
        &self.maintenance
    }

    /// All fuel records, in insertion order.
    #[must_use]
    pub fn fuel_records(&self) -> &[FuelRecord] {
        &self.fuel
    }

    /// One car's maintenance history, newest date first.
    #[must_use]
    pub fn maintenance_for(&self, car_id: CarId) -> Vec<&MaintenanceRecord> {
        let mut records: Vec<&MaintenanceRecord> = self
            .maintenance
            .iter()
            .filter(|m| m.car_id == car_id)
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// One car's fuel history, newest date first.
    #[must_use]
    pub fn fuel_for(&self, car_id: CarId) -> Vec<&FuelRecord> {
        let mut records: Vec<&FuelRecord> =
            self.fuel.iter().filter(|f| f.car_id == car_id).collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Check if the fleet has no cars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Derive upcoming-service reminders as of `today`.
    #[must_use]
    pub fn reminders(&self, today: NaiveDate) -> Vec<Reminder> {
        self.reminders_with(today, &ReminderWindows::default())
    }

    /// Derive upcoming-service reminders as of `today` with custom windows.
    #[must_use]
    pub fn reminders_with(&self, today: NaiveDate, windows: &ReminderWindows) -> Vec<Reminder> {
        derive_reminders_with(&self.cars, &self.maintenance, today, windows)
    }

    /// Average fuel consumption for one car, in liters per 100 km.
    #[must_use]
    pub fn average_consumption(&self, car_id: CarId) -> Option<String> {
        average_fuel_consumption(car_id, &self.fuel)
    }

    /// Get fleet statistics.
    #[must_use]
    pub fn stats(&self) -> FleetStats {
        FleetStats {
            cars: self.cars.len(),
            maintenance_records: self.maintenance.len(),
            fuel_records: self.fuel.len(),
            maintenance_cost: self.maintenance.iter().map(|m| m.cost).sum(),
            fuel_cost: self.fuel.iter().map(|f| f.cost).sum(),
        }
    }

    /// Export the collections as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cars: self.cars.clone(),
            maintenance: self.maintenance.clone(),
            fuel: self.fuel.clone(),
        }
    }

    /// Rebuild a fleet from a snapshot.
    ///
    /// The id counter resumes past the largest id present, so later
    /// insertions never collide. Records referencing missing cars are kept
    /// as-is; derivation skips them.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let last_id = snapshot
            .cars
            .iter()
            .map(|c| c.id)
            .chain(snapshot.maintenance.iter().map(|m| m.id))
            .chain(snapshot.fuel.iter().map(|f| f.id))
            .max()
            .unwrap_or(0);

        Self {
            cars: snapshot.cars,
            maintenance: snapshot.maintenance,
            fuel: snapshot.fuel,
            last_id,
        }
    }
}

/// Statistics about the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    /// Number of registered cars.
    pub cars: usize,
    /// Number of maintenance records.
    pub maintenance_records: usize,
    /// Number of fuel records.
    pub fuel_records: usize,
    /// Total maintenance spend, in whole currency units.
    pub maintenance_cost: i64,
    /// Total fuel spend, in whole currency units.
    pub fuel_cost: i64,
}

/// Serializable form of the three entity collections.
///
/// This is the JSON shape the CLI reads with `--input` and writes after
/// `add` commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Registered cars.
    pub cars: Vec<Car>,
    /// Maintenance records.
    pub maintenance: Vec<MaintenanceRecord>,
    /// Fuel records.
    pub fuel: Vec<FuelRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn new_car(brand: &str, mileage: u32) -> NewCar {
        NewCar {
            brand: brand.to_string(),
            model: "Test".to_string(),
            year: 2020,
            license_plate: "000AAA00".to_string(),
            mileage,
        }
    }

    fn new_fuel(car_id: CarId, mileage: u32, liters: f64) -> NewFuel {
        NewFuel {
            car_id,
            date: test_date(),
            liters,
            cost: 10_000,
            mileage,
        }
    }

    fn new_service(car_id: CarId, mileage: u32) -> NewMaintenance {
        NewMaintenance {
            car_id,
            date: test_date(),
            service_type: "Oil Change".to_string(),
            mileage,
            cost: 15_000,
            next_mileage: None,
            next_date: None,
        }
    }

    #[test]
    fn test_add_car_assigns_ids() {
        let mut fleet = Fleet::new();
        let first = fleet.add_car(new_car("Toyota", 1_000));
        let second = fleet.add_car(new_car("Honda", 2_000));

        assert_ne!(first, second);
        assert_eq!(fleet.cars().len(), 2);
        assert_eq!(fleet.car(first).unwrap().brand, "Toyota");
        assert_eq!(fleet.car(second).unwrap().brand, "Honda");
    }

    #[test]
    fn test_car_not_found() {
        let fleet = Fleet::new();
        assert!(fleet.car(99).is_none());
        assert!(fleet.require_car(99).unwrap_err().is_unknown_car());
    }

    #[test]
    fn test_add_fuel_raises_mileage() {
        init_test_logging();
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 10_000));

        fleet.add_fuel(new_fuel(car_id, 10_500, 40.0)).unwrap();
        assert_eq!(fleet.car(car_id).unwrap().mileage, 10_500);
    }

    #[test]
    fn test_add_fuel_lower_mileage_leaves_car_unchanged() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 10_000));

        fleet.add_fuel(new_fuel(car_id, 9_500, 40.0)).unwrap();
        assert_eq!(fleet.car(car_id).unwrap().mileage, 10_000);
    }

    #[test]
    fn test_add_maintenance_raises_mileage() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 10_000));

        fleet.add_maintenance(new_service(car_id, 12_000)).unwrap();
        assert_eq!(fleet.car(car_id).unwrap().mileage, 12_000);
    }

    #[test]
    fn test_mileage_ratchet_is_exact() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 10_000));

        fleet.add_fuel(new_fuel(car_id, 10_001, 40.0)).unwrap();
        assert_eq!(fleet.car(car_id).unwrap().mileage, 10_001);
    }

    #[test]
    fn test_add_record_unknown_car() {
        let mut fleet = Fleet::new();
        let err = fleet.add_fuel(new_fuel(99, 1_000, 40.0)).unwrap_err();
        assert!(err.is_unknown_car());

        let err = fleet.add_maintenance(new_service(99, 1_000)).unwrap_err();
        assert!(err.is_unknown_car());
        assert!(fleet.maintenance().is_empty());
        assert!(fleet.fuel_records().is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 0));

        let mut old = new_fuel(car_id, 100, 40.0);
        old.date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut recent = new_fuel(car_id, 200, 40.0);
        recent.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        fleet.add_fuel(old).unwrap();
        fleet.add_fuel(recent).unwrap();

        let history = fleet.fuel_for(car_id);
        assert_eq!(history.len(), 2);
        assert!(history[0].date > history[1].date);
    }

    #[test]
    fn test_history_filters_by_car() {
        let mut fleet = Fleet::new();
        let first = fleet.add_car(new_car("Toyota", 0));
        let second = fleet.add_car(new_car("Honda", 0));

        fleet.add_maintenance(new_service(first, 100)).unwrap();
        fleet.add_maintenance(new_service(second, 100)).unwrap();
        fleet.add_maintenance(new_service(second, 200)).unwrap();

        assert_eq!(fleet.maintenance_for(first).len(), 1);
        assert_eq!(fleet.maintenance_for(second).len(), 2);
    }

    #[test]
    fn test_average_consumption_via_fleet() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 0));

        fleet.add_fuel(new_fuel(car_id, 1_000, 5.0)).unwrap();
        fleet.add_fuel(new_fuel(car_id, 1_200, 10.0)).unwrap();
        fleet.add_fuel(new_fuel(car_id, 1_500, 12.0)).unwrap();

        assert_eq!(fleet.average_consumption(car_id), Some("4.4".to_string()));
    }

    #[test]
    fn test_reminders_via_fleet() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 9_500));

        let mut service = new_service(car_id, 9_500);
        service.next_mileage = Some(10_000);
        fleet.add_maintenance(service).unwrap();

        let reminders = fleet.reminders(test_date());
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].car_id, car_id);
    }

    #[test]
    fn test_stats_empty() {
        let stats = Fleet::new().stats();
        assert_eq!(stats.cars, 0);
        assert_eq!(stats.maintenance_records, 0);
        assert_eq!(stats.fuel_records, 0);
        assert_eq!(stats.maintenance_cost, 0);
        assert_eq!(stats.fuel_cost, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 0));
        fleet.add_maintenance(new_service(car_id, 100)).unwrap();
        fleet.add_maintenance(new_service(car_id, 200)).unwrap();
        fleet.add_fuel(new_fuel(car_id, 300, 40.0)).unwrap();

        let stats = fleet.stats();
        assert_eq!(stats.cars, 1);
        assert_eq!(stats.maintenance_records, 2);
        assert_eq!(stats.fuel_records, 1);
        assert_eq!(stats.maintenance_cost, 30_000);
        assert_eq!(stats.fuel_cost, 10_000);
    }

    #[test]
    fn test_is_empty() {
        let mut fleet = Fleet::new();
        assert!(fleet.is_empty());
        fleet.add_car(new_car("Toyota", 0));
        assert!(!fleet.is_empty());
    }

    #[test]
    fn test_sample_fleet() {
        let fleet = Fleet::sample();
        assert_eq!(fleet.cars().len(), 1);

        let car = &fleet.cars()[0];
        assert_eq!(car.label(), "Toyota Camry");
        assert_eq!(car.year, 2021);
        assert_eq!(car.license_plate, "123ABC01");
        assert_eq!(car.mileage, 45_000);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 0));
        fleet.add_maintenance(new_service(car_id, 100)).unwrap();
        fleet.add_fuel(new_fuel(car_id, 200, 40.0)).unwrap();

        let json = serde_json::to_string(&fleet.snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = Fleet::from_snapshot(snapshot);

        assert_eq!(restored, fleet);
    }

    #[test]
    fn test_from_snapshot_resumes_id_counter() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 0));
        fleet.add_fuel(new_fuel(car_id, 200, 40.0)).unwrap();

        let mut restored = Fleet::from_snapshot(fleet.snapshot());
        let new_id = restored.add_car(new_car("Honda", 0));
        assert!(new_id > car_id);
        assert_eq!(restored.cars().len(), 2);
    }

    #[test]
    fn test_from_snapshot_tolerates_dangling_records() {
        let mut fleet = Fleet::new();
        let car_id = fleet.add_car(new_car("Toyota", 9_500));
        let mut service = new_service(car_id, 9_500);
        service.next_mileage = Some(10_000);
        fleet.add_maintenance(service).unwrap();

        let mut snapshot = fleet.snapshot();
        snapshot.cars.clear();

        let restored = Fleet::from_snapshot(snapshot);
        assert_eq!(restored.maintenance().len(), 1);
        // The orphaned record derives nothing and raises nothing.
        assert!(restored.reminders(test_date()).is_empty());
    }

    #[test]
    fn test_empty_snapshot_deserializes_from_empty_object() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(Fleet::from_snapshot(snapshot), Fleet::new());
    }
}
