use std::rc::Rc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::driver::Driver;
use crate::error::DispatchError;
use crate::identified::{validate_id, EntityKind, Id, Identified};
use crate::passenger::Passenger;
use crate::records::TripRecord;

/// Lowest and highest accepted passenger rating.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A ride linking one driver and one passenger.
///
/// Immutable once built. The trip refers to its driver and passenger by id only;
/// [`Trip::connect`] registers a shared handle on both entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id: Id,
    driver_id: Id,
    passenger_id: Id,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    cost: Option<Decimal>,
    rating: Option<u8>,
}

impl Trip {
    pub fn builder(id: Id, start_time: DateTime<Utc>) -> TripBuilder {
        TripBuilder {
            id,
            driver_id: None,
            passenger_id: None,
            start_time,
            end_time: None,
            cost: None,
            rating: None,
        }
    }

    pub(crate) fn from_record(record: &TripRecord) -> Result<Trip, DispatchError> {
        Trip::builder(record.id, record.start_time)
            .driver_id(record.driver_id)
            .passenger_id(record.passenger_id)
            .maybe_end_time(record.end_time)
            .maybe_cost(record.cost)
            .maybe_rating(record.rating)
            .build()
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn driver_id(&self) -> Id {
        self.driver_id
    }

    pub fn passenger_id(&self) -> Id {
        self.passenger_id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn cost(&self) -> Option<Decimal> {
        self.cost
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// A trip without an end time has not finished yet.
    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    /// Trip length in seconds; 0 while the trip is in progress.
    pub fn calculate_duration(&self) -> i64 {
        self.end_time
            .map(|end| (end - self.start_time).num_seconds())
            .unwrap_or(0)
    }

    /// Register this trip on its driver and passenger.
    ///
    /// Both entities must be the ones named by the trip's ids. Calling it twice
    /// registers the trip twice.
    pub fn connect(
        self: &Rc<Self>,
        driver: &mut Driver,
        passenger: &mut Passenger,
    ) -> Result<(), DispatchError> {
        if driver.id() != self.driver_id {
            return Err(DispatchError::validation(format!(
                "trip {} belongs to driver {}, not driver {}",
                self.id,
                self.driver_id,
                driver.id()
            )));
        }
        if passenger.id() != self.passenger_id {
            return Err(DispatchError::validation(format!(
                "trip {} belongs to passenger {}, not passenger {}",
                self.id,
                self.passenger_id,
                passenger.id()
            )));
        }

        passenger.add_trip(Rc::clone(self));
        driver.add_trip(Rc::clone(self));
        Ok(())
    }
}

impl Identified for Trip {
    fn id(&self) -> Id {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Trip
    }
}

/// Collects trip fields and validates them in [`TripBuilder::build`].
///
/// Driver and passenger may be given either as an entity reference or as a bare id.
#[derive(Debug, Clone)]
pub struct TripBuilder {
    id: Id,
    driver_id: Option<Id>,
    passenger_id: Option<Id>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    cost: Option<Decimal>,
    rating: Option<i64>,
}

impl TripBuilder {
    pub fn driver(mut self, driver: &Driver) -> Self {
        self.driver_id = Some(driver.id());
        self
    }

    pub fn driver_id(mut self, driver_id: Id) -> Self {
        self.driver_id = Some(driver_id);
        self
    }

    pub fn passenger(mut self, passenger: &Passenger) -> Self {
        self.passenger_id = Some(passenger.id());
        self
    }

    pub fn passenger_id(mut self, passenger_id: Id) -> Self {
        self.passenger_id = Some(passenger_id);
        self
    }

    pub fn end_time(self, end_time: DateTime<Utc>) -> Self {
        self.maybe_end_time(Some(end_time))
    }

    pub fn maybe_end_time(mut self, end_time: Option<DateTime<Utc>>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn cost(self, cost: Decimal) -> Self {
        self.maybe_cost(Some(cost))
    }

    pub fn maybe_cost(mut self, cost: Option<Decimal>) -> Self {
        self.cost = cost;
        self
    }

    pub fn rating(self, rating: i64) -> Self {
        self.maybe_rating(Some(rating))
    }

    pub fn maybe_rating(mut self, rating: Option<i64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn build(self) -> Result<Trip, DispatchError> {
        let id = validate_id(EntityKind::Trip, self.id)?;

        let driver_id = self
            .driver_id
            .ok_or_else(|| DispatchError::validation("driver or driver_id is required"))?;
        let passenger_id = self
            .passenger_id
            .ok_or_else(|| DispatchError::validation("passenger or passenger_id is required"))?;

        if let Some(end_time) = self.end_time {
            if end_time < self.start_time {
                return Err(DispatchError::validation(format!(
                    "trip {id} ends at {end_time}, before it starts at {}",
                    self.start_time
                )));
            }
        }

        let rating = match self.rating {
            None => None,
            Some(raw) => Some(
                u8::try_from(raw)
                    .ok()
                    .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
                    .ok_or_else(|| {
                        DispatchError::validation(format!(
                            "rating must be between {MIN_RATING} and {MAX_RATING}, got {raw}"
                        ))
                    })?,
            ),
        };

        Ok(Trip {
            id,
            driver_id,
            passenger_id,
            start_time: self.start_time,
            end_time: self.end_time,
            cost: self.cost,
            rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_helpers::{test_driver, test_passenger, test_time};

    fn base_trip() -> TripBuilder {
        Trip::builder(8, test_time("2015-05-20T12:14:00Z"))
            .driver(&test_driver(54))
            .passenger(&test_passenger(1))
            .end_time(test_time("2015-05-20T12:39:00Z"))
            .cost(dec!(23.45))
            .rating(3)
    }

    #[test]
    fn builds_with_entity_references() {
        let trip = base_trip().build().unwrap();
        assert_eq!(trip.id(), 8);
        assert_eq!(trip.driver_id(), 54);
        assert_eq!(trip.passenger_id(), 1);
        assert_eq!(trip.cost(), Some(dec!(23.45)));
        assert_eq!(trip.rating(), Some(3));
    }

    #[test]
    fn builds_with_bare_ids() {
        let trip = Trip::builder(3, test_time("2016-08-08T00:00:00Z"))
            .driver_id(2)
            .passenger_id(3)
            .build()
            .unwrap();
        assert_eq!(trip.driver_id(), 2);
        assert_eq!(trip.passenger_id(), 3);
        assert!(trip.is_in_progress());
    }

    #[test]
    fn rejects_missing_driver_or_passenger() {
        let start = test_time("2016-08-08T00:00:00Z");
        let no_driver = Trip::builder(1, start).passenger_id(1).build();
        let no_passenger = Trip::builder(1, start).driver_id(1).build();
        assert!(no_driver.unwrap_err().is_validation());
        assert!(no_passenger.unwrap_err().is_validation());
    }

    #[test]
    fn rejects_non_positive_id() {
        let err = Trip::builder(0, test_time("2016-08-08T00:00:00Z"))
            .driver_id(1)
            .passenger_id(1)
            .build()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rejects_end_before_start() {
        let err = base_trip()
            .end_time(test_time("2015-05-20T11:14:00Z"))
            .build()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn accepts_zero_length_trip() {
        let trip = base_trip()
            .end_time(test_time("2015-05-20T12:14:00Z"))
            .build()
            .unwrap();
        assert_eq!(trip.calculate_duration(), 0);
    }

    #[test]
    fn rating_outside_one_to_five_is_rejected() {
        for rating in [-3, 0, 6, 300] {
            let err = base_trip().rating(rating).build().unwrap_err();
            assert!(err.is_validation(), "rating {rating} should be rejected");
        }
    }

    #[test]
    fn rating_inside_one_to_five_is_accepted() {
        for rating in 1..=5 {
            let trip = base_trip().rating(rating).build().unwrap();
            assert_eq!(trip.rating(), Some(rating as u8));
        }
    }

    #[test]
    fn duration_is_seconds_between_start_and_end() {
        let trip = base_trip()
            .end_time(test_time("2015-05-20T12:44:00Z"))
            .build()
            .unwrap();
        assert_eq!(trip.calculate_duration(), 1800);
    }

    #[test]
    fn duration_is_zero_without_end_time() {
        let trip = base_trip().maybe_end_time(None).build().unwrap();
        assert_eq!(trip.calculate_duration(), 0);
    }

    #[test]
    fn connect_registers_on_both_entities() {
        let mut driver = test_driver(54);
        let mut passenger = test_passenger(1);
        let trip = Rc::new(base_trip().build().unwrap());

        trip.connect(&mut driver, &mut passenger).unwrap();

        assert!(driver.trips().contains(&trip));
        assert!(passenger.trips().contains(&trip));
    }

    #[test]
    fn connect_twice_registers_twice() {
        let mut driver = test_driver(54);
        let mut passenger = test_passenger(1);
        let trip = Rc::new(base_trip().build().unwrap());

        trip.connect(&mut driver, &mut passenger).unwrap();
        trip.connect(&mut driver, &mut passenger).unwrap();

        assert_eq!(driver.trips().len(), 2);
        assert_eq!(passenger.trips().len(), 2);
    }

    #[test]
    fn connect_rejects_other_driver_without_mutation() {
        let mut other_driver = test_driver(7);
        let mut passenger = test_passenger(1);
        let trip = Rc::new(base_trip().build().unwrap());

        let err = trip.connect(&mut other_driver, &mut passenger).unwrap_err();

        assert!(err.is_validation());
        assert!(other_driver.trips().is_empty());
        assert!(passenger.trips().is_empty());
    }
}
