use chrono::{DateTime, Utc};

use super::DriverSelection;
use crate::driver::Driver;
use crate::identified::Id;

/// Prefers drivers who have waited longest since their last trip.
///
/// # Algorithm Behavior
///
/// 1. Skips drivers that are unavailable or still have a trip in progress
/// 2. Returns the first driver with no trips at all, if any
/// 3. Otherwise returns the driver whose latest trip ended earliest
///
/// Ties keep load order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LongestIdle;

impl DriverSelection for LongestIdle {
    fn select_driver(&self, drivers: &[&Driver], _now: DateTime<Utc>) -> Option<Id> {
        let candidates = drivers
            .iter()
            .filter(|driver| driver.is_available() && !driver.has_trip_in_progress());

        // `None` sorts before any `Some`, so drivers without trips win.
        candidates
            .min_by_key(|driver| driver.last_trip_end())
            .map(|driver| driver.id())
    }
}
