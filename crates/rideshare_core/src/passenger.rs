use std::fmt;
use std::rc::Rc;

use rust_decimal::Decimal;

use crate::error::DispatchError;
use crate::identified::{validate_id, EntityKind, Id, Identified};
use crate::records::PassengerRecord;
use crate::trip::Trip;

pub struct Passenger {
    id: Id,
    name: String,
    phone_number: String,
    trips: Vec<Rc<Trip>>,
}

impl Passenger {
    pub fn new(
        id: Id,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        Ok(Self {
            id: validate_id(EntityKind::Passenger, id)?,
            name: name.into(),
            phone_number: phone_number.into(),
            trips: Vec::new(),
        })
    }

    pub(crate) fn from_record(record: &PassengerRecord) -> Result<Self, DispatchError> {
        Self::new(record.id, record.name.clone(), record.phone_num.clone())
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn trips(&self) -> &[Rc<Trip>] {
        &self.trips
    }

    /// Append a trip. Duplicates are kept.
    pub fn add_trip(&mut self, trip: Rc<Trip>) -> &[Rc<Trip>] {
        self.trips.push(trip);
        &self.trips
    }

    /// Total fares paid; unpriced trips count as zero.
    pub fn net_expenditures(&self) -> Decimal {
        self.trips.iter().filter_map(|trip| trip.cost()).sum()
    }

    /// Minutes spent riding. Trips still in progress contribute nothing.
    pub fn total_time_spent(&self) -> f64 {
        let seconds: i64 = self.trips.iter().map(|trip| trip.calculate_duration()).sum();
        seconds as f64 / 60.0
    }
}

impl Identified for Passenger {
    fn id(&self) -> Id {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Passenger
    }
}

impl fmt::Debug for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passenger")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("phone_number", &self.phone_number)
            .field("trip_ids", &self.trips.iter().map(|trip| trip.id()).collect::<Vec<_>>())
            .finish()
    }
}
