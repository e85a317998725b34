use chrono::{DateTime, Utc};

use super::DriverSelection;
use crate::driver::Driver;
use crate::identified::Id;

/// First available driver in load order.
///
/// The default policy: no scoring, no idle-time preference, so the same
/// dataset always yields the same assignment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstAvailable;

impl DriverSelection for FirstAvailable {
    fn select_driver(&self, drivers: &[&Driver], _now: DateTime<Utc>) -> Option<Id> {
        drivers
            .iter()
            .find(|driver| driver.is_available())
            .map(|driver| driver.id())
    }
}
