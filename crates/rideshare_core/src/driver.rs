use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::identified::{validate_id, EntityKind, Id, Identified};
use crate::pricing::RevenuePolicy;
use crate::records::DriverRecord;
use crate::trip::Trip;

/// Number of characters in a vehicle identification number.
pub const VIN_LENGTH: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    #[default]
    Available,
    Unavailable,
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverStatus::Available => f.write_str("AVAILABLE"),
            DriverStatus::Unavailable => f.write_str("UNAVAILABLE"),
        }
    }
}

pub struct Driver {
    id: Id,
    name: String,
    vin: String,
    status: DriverStatus,
    trips: Vec<Rc<Trip>>,
}

impl Driver {
    /// New driver with the default `Available` status.
    pub fn new(
        id: Id,
        name: impl Into<String>,
        vin: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        Self::with_status(id, name, vin, DriverStatus::default())
    }

    pub fn with_status(
        id: Id,
        name: impl Into<String>,
        vin: impl Into<String>,
        status: DriverStatus,
    ) -> Result<Self, DispatchError> {
        let id = validate_id(EntityKind::Driver, id)?;
        let vin = vin.into();
        validate_vin(&vin)?;
        Ok(Self {
            id,
            name: name.into(),
            vin,
            status,
            trips: Vec::new(),
        })
    }

    pub(crate) fn from_record(record: &DriverRecord) -> Result<Self, DispatchError> {
        Self::with_status(
            record.id,
            record.name.clone(),
            record.vin.clone(),
            record.status.unwrap_or_default(),
        )
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }

    pub fn trips(&self) -> &[Rc<Trip>] {
        &self.trips
    }

    /// Append a trip. Duplicates are kept.
    pub fn add_trip(&mut self, trip: Rc<Trip>) -> &[Rc<Trip>] {
        self.trips.push(trip);
        &self.trips
    }

    pub(crate) fn mark_unavailable(&mut self) {
        self.status = DriverStatus::Unavailable;
    }

    /// Mean rating over rated trips, 0.0 when none is rated.
    pub fn average_rating(&self) -> f64 {
        let ratings: Vec<f64> = self
            .trips
            .iter()
            .filter_map(|trip| trip.rating())
            .map(f64::from)
            .collect();
        if ratings.is_empty() {
            return 0.0;
        }
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }

    /// Earnings under the default [`RevenuePolicy`].
    pub fn calculate_total_revenue(&self) -> Decimal {
        self.total_revenue_with(&RevenuePolicy::default())
    }

    /// Earnings over every trip with a fare; unpriced trips add nothing.
    pub fn total_revenue_with(&self, policy: &RevenuePolicy) -> Decimal {
        policy.total_payout(self.trips.iter().filter_map(|trip| trip.cost()))
    }

    pub fn completed_trip_count(&self) -> usize {
        self.trips.iter().filter(|trip| !trip.is_in_progress()).count()
    }

    /// Minutes spent on finished trips.
    pub fn total_time_driving(&self) -> f64 {
        let seconds: i64 = self.trips.iter().map(|trip| trip.calculate_duration()).sum();
        seconds as f64 / 60.0
    }

    pub fn has_trip_in_progress(&self) -> bool {
        self.trips.iter().any(|trip| trip.is_in_progress())
    }

    /// End time of the latest finished trip.
    pub fn last_trip_end(&self) -> Option<DateTime<Utc>> {
        self.trips.iter().filter_map(|trip| trip.end_time()).max()
    }
}

impl Identified for Driver {
    fn id(&self) -> Id {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Driver
    }
}

// Trips are listed by id so printing never walks back into passengers.
impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("vin", &self.vin)
            .field("status", &self.status)
            .field("trip_ids", &self.trips.iter().map(|trip| trip.id()).collect::<Vec<_>>())
            .finish()
    }
}

fn validate_vin(vin: &str) -> Result<(), DispatchError> {
    let well_formed =
        vin.chars().count() == VIN_LENGTH && vin.chars().all(|c| c.is_ascii_alphanumeric());
    if !well_formed {
        return Err(DispatchError::validation(format!(
            "VIN must be exactly {VIN_LENGTH} alphanumeric characters, got {vin:?}"
        )));
    }
    Ok(())
}
