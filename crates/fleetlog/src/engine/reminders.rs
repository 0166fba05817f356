//! Upcoming-service reminder derivation.
//!
//! Scans the maintenance records for next-service thresholds that fall
//! within a lookahead window relative to a supplied "today" and the owning
//! car's current mileage. Reminders are derived on every call and never
//! stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{Car, CarId, MaintenanceRecord};

/// How urgent a reminder is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The due threshold is inside the lookahead window.
    Warning,
    /// The due threshold is imminent.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A derived notification that a car's next service is approaching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identifier, derived from the triggering record's id with a
    /// `date-`/`km-` discriminator so the two trigger kinds never collide.
    pub id: String,

    /// The car the reminder is for.
    pub car_id: CarId,

    /// Human-readable reminder text.
    pub text: String,

    /// How urgent the reminder is.
    pub severity: Severity,
}

impl Reminder {
    /// Check if this reminder is critical.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

/// Lookahead windows and critical thresholds for reminder derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderWindows {
    /// Emit a date reminder when the due date is at most this many days away.
    pub date_window_days: i64,

    /// A date reminder is critical when fewer than this many days remain.
    pub date_critical_days: i64,

    /// Emit a mileage reminder when the due reading is at most this many km
    /// away.
    pub mileage_window_km: i64,

    /// A mileage reminder is critical when fewer than this many km remain.
    pub mileage_critical_km: i64,
}

impl Default for ReminderWindows {
    fn default() -> Self {
        Self {
            date_window_days: 30,
            date_critical_days: 7,
            mileage_window_km: 1000,
            mileage_critical_km: 200,
        }
    }
}

/// Derive upcoming-service reminders with the default windows.
///
/// See [`derive_reminders_with`] for the full contract.
#[must_use]
pub fn derive_reminders(
    cars: &[Car],
    maintenance: &[MaintenanceRecord],
    today: NaiveDate,
) -> Vec<Reminder> {
    derive_reminders_with(cars, maintenance, today, &ReminderWindows::default())
}

/// Derive upcoming-service reminders.
///
/// Each maintenance record is evaluated independently and may contribute
/// zero, one, or two reminders: one for its due date and one for its due
/// mileage. A due date within `windows.date_window_days` of `today` emits a
/// reminder (critical under `windows.date_critical_days`); a due mileage
/// within `windows.mileage_window_km` of the car's current reading emits a
/// reminder (critical under `windows.mileage_critical_km`). Thresholds that
/// are already past contribute nothing, and a due mileage of zero counts as
/// unscheduled.
///
/// Records whose `car_id` does not resolve to a car are silently skipped.
/// Output follows the maintenance records' supply order, date trigger before
/// mileage trigger for the same record; no further ordering is guaranteed.
#[must_use]
pub fn derive_reminders_with(
    cars: &[Car],
    maintenance: &[MaintenanceRecord],
    today: NaiveDate,
    windows: &ReminderWindows,
) -> Vec<Reminder> {
    let mut reminders = Vec::new();

    for record in maintenance {
        let Some(car) = cars.iter().find(|c| c.id == record.car_id) else {
            continue;
        };

        if let Some(next_date) = record.next_date {
            let days_left = (next_date - today).num_days();
            if (0..=windows.date_window_days).contains(&days_left) {
                reminders.push(Reminder {
                    id: format!("date-{}", record.id),
                    car_id: car.id,
                    text: format!("{}: Service due in {days_left} days", car.label()),
                    severity: if days_left < windows.date_critical_days {
                        Severity::Critical
                    } else {
                        Severity::Warning
                    },
                });
            }
        }

        if let Some(next_mileage) = record.next_mileage.filter(|&km| km > 0) {
            let km_left = i64::from(next_mileage) - i64::from(car.mileage);
            if (0..=windows.mileage_window_km).contains(&km_left) {
                reminders.push(Reminder {
                    id: format!("km-{}", record.id),
                    car_id: car.id,
                    text: format!("{}: Service due in {km_left} km", car.label()),
                    severity: if km_left < windows.mileage_critical_km {
                        Severity::Critical
                    } else {
                        Severity::Warning
                    },
                });
            }
        }
    }

    reminders
}
