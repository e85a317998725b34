//! Record source contract: the raw rows the dispatcher is built from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::driver::DriverStatus;
use crate::error::RecordSourceError;
use crate::identified::Id;

/// One driver row. A missing `status` means available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRecord {
    pub id: Id,
    pub name: String,
    pub vin: String,
    pub status: Option<DriverStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerRecord {
    pub id: Id,
    pub name: String,
    pub phone_num: String,
}

/// One trip row. `end_time`, `cost` and `rating` are absent for trips in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub id: Id,
    pub driver_id: Id,
    pub passenger_id: Id,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub cost: Option<Decimal>,
    pub rating: Option<i64>,
}

/// Produces materialized records, in order, for each entity kind.
pub trait RecordSource {
    fn driver_records(&self) -> Result<Vec<DriverRecord>, RecordSourceError>;

    fn passenger_records(&self) -> Result<Vec<PassengerRecord>, RecordSourceError>;

    fn trip_records(&self) -> Result<Vec<TripRecord>, RecordSourceError>;
}

/// Records held in memory, for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    pub drivers: Vec<DriverRecord>,
    pub passengers: Vec<PassengerRecord>,
    pub trips: Vec<TripRecord>,
}

impl RecordSource for InMemoryRecords {
    fn driver_records(&self) -> Result<Vec<DriverRecord>, RecordSourceError> {
        Ok(self.drivers.clone())
    }

    fn passenger_records(&self) -> Result<Vec<PassengerRecord>, RecordSourceError> {
        Ok(self.passengers.clone())
    }

    fn trip_records(&self) -> Result<Vec<TripRecord>, RecordSourceError> {
        Ok(self.trips.clone())
    }
}
