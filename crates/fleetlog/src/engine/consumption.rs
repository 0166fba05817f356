//! Fuel consumption statistics.
//!
//! Computes a car's average consumption from the ordered sequence of its
//! odometer readings, plus the per-fill price trend shown in detail views.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{CarId, FuelRecord};

/// Average fuel consumption for one car, in liters per 100 km, formatted to
/// one decimal place.
///
/// Records are filtered to the given car and sorted by mileage internally,
/// so input order never affects the result. A fill's liters are attributed
/// to the distance gap *before* its odometer reading: the earliest record
/// only establishes the baseline and its own liters are excluded from the
/// total.
///
/// Returns `None` when fewer than two records exist for the car, or when the
/// total distance is zero (duplicate odometer readings).
#[must_use]
pub fn average_fuel_consumption(car_id: CarId, records: &[FuelRecord]) -> Option<String> {
    let mut fills: Vec<&FuelRecord> = records.iter().filter(|f| f.car_id == car_id).collect();
    fills.sort_by_key(|f| f.mileage);

    if fills.len() < 2 {
        return None;
    }

    let mut total_km: u64 = 0;
    let mut total_liters = 0.0;
    for pair in fills.windows(2) {
        total_km += u64::from(pair[1].mileage - pair[0].mileage);
        total_liters += pair[1].liters;
    }

    if total_km == 0 {
        return None;
    }

    let per_hundred = total_liters / total_km as f64 * 100.0;
    Some(format!("{per_hundred:.1}"))
}

/// A single point in a car's fuel price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    /// Date of the fill.
    pub date: NaiveDate,

    /// Price paid per liter, rounded to the nearest whole currency unit.
    pub price_per_liter: i64,
}

/// Per-fill price history for one car, oldest first, capped at the `limit`
/// most recent fills by date.
///
/// Fills with a non-positive volume are skipped; there is no meaningful
/// per-liter price for them.
#[must_use]
pub fn fuel_price_trend(car_id: CarId, records: &[FuelRecord], limit: usize) -> Vec<PricePoint> {
    let mut fills: Vec<&FuelRecord> = records
        .iter()
        .filter(|f| f.car_id == car_id && f.liters > 0.0)
        .collect();
    fills.sort_by_key(|f| f.date);

    let skip = fills.len().saturating_sub(limit);
    fills[skip..]
        .iter()
        .filter_map(|f| {
            f.price_per_liter().map(|price_per_liter| PricePoint {
                date: f.date,
                price_per_liter,
            })
        })
        .collect()
}
