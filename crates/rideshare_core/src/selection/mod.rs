pub mod first_available;
pub mod longest_idle;

use chrono::{DateTime, Utc};

use crate::driver::Driver;
use crate::identified::Id;

pub use first_available::FirstAvailable;
pub use longest_idle::LongestIdle;

/// Picks the driver for a new trip.
///
/// `drivers` arrives in load order. Implementations must be deterministic for
/// the same input and must only return the id of an `Available` driver.
pub trait DriverSelection {
    fn select_driver(&self, drivers: &[&Driver], now: DateTime<Utc>) -> Option<Id>;
}

/// Named selection policies, used by [`DispatchConfig`](crate::config::DispatchConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicyKind {
    #[default]
    FirstAvailable,
    LongestIdle,
}

impl SelectionPolicyKind {
    pub fn build(self) -> Box<dyn DriverSelection> {
        match self {
            SelectionPolicyKind::FirstAvailable => Box::new(FirstAvailable),
            SelectionPolicyKind::LongestIdle => Box::new(LongestIdle),
        }
    }
}
