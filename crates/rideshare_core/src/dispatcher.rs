//! The dispatch engine: owns every entity, cross-links loaded trips and serves new requests.

use std::fmt;
use std::rc::Rc;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::clock::{Clock, SystemClock};
use crate::config::DispatchConfig;
use crate::driver::Driver;
use crate::error::DispatchError;
use crate::identified::{validate_id, EntityKind, Id};
use crate::passenger::Passenger;
use crate::pricing::RevenuePolicy;
use crate::records::RecordSource;
use crate::selection::DriverSelection;
use crate::summary::DatasetSummary;
use crate::trip::Trip;

/// Registry of drivers, passengers and trips.
///
/// Drivers and passengers are kept in load order and indexed by id. Trips are kept
/// in load order followed by request order.
pub struct TripDispatcher {
    drivers: IndexMap<Id, Driver>,
    passengers: IndexMap<Id, Passenger>,
    trips: Vec<Rc<Trip>>,
    selection: Box<dyn DriverSelection>,
    clock: Box<dyn Clock>,
    revenue_policy: RevenuePolicy,
}

impl TripDispatcher {
    /// Load with the default configuration.
    pub fn load<S: RecordSource + ?Sized>(source: &S) -> Result<Self, DispatchError> {
        Self::load_with_config(source, DispatchConfig::default())
    }

    pub fn load_with_config<S: RecordSource + ?Sized>(
        source: &S,
        config: DispatchConfig,
    ) -> Result<Self, DispatchError> {
        let mut dispatcher = Self {
            drivers: IndexMap::new(),
            passengers: IndexMap::new(),
            trips: Vec::new(),
            selection: config.selection.build(),
            clock: Box::new(SystemClock),
            revenue_policy: config.revenue_policy,
        };
        dispatcher.load_drivers(source)?;
        dispatcher.load_passengers(source)?;
        dispatcher.load_trips(source)?;
        Ok(dispatcher)
    }

    /// Replace the clock used to stamp requested trips.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the driver selection policy with a custom implementation.
    pub fn with_selection(mut self, selection: impl DriverSelection + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    fn load_drivers<S: RecordSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<(), DispatchError> {
        for record in source.driver_records()? {
            let driver = Driver::from_record(&record)?;
            match self.drivers.entry(driver.id()) {
                Entry::Occupied(_) => {
                    return Err(DispatchError::DataIntegrity(format!(
                        "duplicate driver id {}",
                        driver.id()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(driver);
                }
            }
        }
        tracing::debug!(drivers = self.drivers.len(), "loaded drivers");
        Ok(())
    }

    fn load_passengers<S: RecordSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<(), DispatchError> {
        for record in source.passenger_records()? {
            let passenger = Passenger::from_record(&record)?;
            match self.passengers.entry(passenger.id()) {
                Entry::Occupied(_) => {
                    return Err(DispatchError::DataIntegrity(format!(
                        "duplicate passenger id {}",
                        passenger.id()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(passenger);
                }
            }
        }
        tracing::debug!(passengers = self.passengers.len(), "loaded passengers");
        Ok(())
    }

    fn load_trips<S: RecordSource + ?Sized>(&mut self, source: &S) -> Result<(), DispatchError> {
        for record in source.trip_records()? {
            let driver = self.drivers.get_mut(&record.driver_id).ok_or_else(|| {
                DispatchError::DataIntegrity(format!(
                    "trip {} references unknown driver {}",
                    record.id, record.driver_id
                ))
            })?;
            let passenger = self.passengers.get_mut(&record.passenger_id).ok_or_else(|| {
                DispatchError::DataIntegrity(format!(
                    "trip {} references unknown passenger {}",
                    record.id, record.passenger_id
                ))
            })?;

            let trip = Rc::new(Trip::from_record(&record)?);
            trip.connect(driver, passenger)?;
            self.trips.push(trip);
        }
        tracing::debug!(trips = self.trips.len(), "loaded trips");
        Ok(())
    }

    pub fn drivers(&self) -> impl DoubleEndedIterator<Item = &Driver> + ExactSizeIterator + '_ {
        self.drivers.values()
    }

    pub fn passengers(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Passenger> + ExactSizeIterator + '_ {
        self.passengers.values()
    }

    pub fn trips(&self) -> &[Rc<Trip>] {
        &self.trips
    }

    pub fn revenue_policy(&self) -> &RevenuePolicy {
        &self.revenue_policy
    }

    pub fn find_driver(&self, id: Id) -> Result<&Driver, DispatchError> {
        let id = validate_id(EntityKind::Driver, id)?;
        self.drivers.get(&id).ok_or(DispatchError::NotFound {
            entity: EntityKind::Driver,
            id,
        })
    }

    pub fn find_passenger(&self, id: Id) -> Result<&Passenger, DispatchError> {
        let id = validate_id(EntityKind::Passenger, id)?;
        self.passengers.get(&id).ok_or(DispatchError::NotFound {
            entity: EntityKind::Passenger,
            id,
        })
    }

    pub fn find_trip(&self, id: Id) -> Result<&Rc<Trip>, DispatchError> {
        let id = validate_id(EntityKind::Trip, id)?;
        self.trips
            .iter()
            .find(|trip| trip.id() == id)
            .ok_or(DispatchError::NotFound {
                entity: EntityKind::Trip,
                id,
            })
    }

    /// The driver a trip refers to, if it is registered here.
    pub fn driver_of(&self, trip: &Trip) -> Option<&Driver> {
        self.drivers.get(&trip.driver_id())
    }

    pub fn passenger_of(&self, trip: &Trip) -> Option<&Passenger> {
        self.passengers.get(&trip.passenger_id())
    }

    /// Dispatch a new trip for `passenger_id` to a driver chosen by the selection policy.
    ///
    /// On success the trip starts now with no end time, cost or rating, is registered on
    /// the driver and passenger, the driver becomes unavailable, and the trip is appended.
    /// On failure nothing is changed.
    pub fn request_trip(&mut self, passenger_id: Id) -> Result<Rc<Trip>, DispatchError> {
        if passenger_id <= 0 || !self.passengers.contains_key(&passenger_id) {
            return Err(DispatchError::validation(format!(
                "passenger {passenger_id} is not registered"
            )));
        }

        let now = self.clock.now();
        let candidates: Vec<&Driver> = self.drivers.values().collect();
        let Some(driver_id) = self.selection.select_driver(&candidates, now) else {
            tracing::warn!(passenger_id, "no available drivers for trip request");
            return Err(DispatchError::validation("no available drivers"));
        };

        let trip_id = self.next_trip_id()?;
        let trip = Rc::new(
            Trip::builder(trip_id, now)
                .driver_id(driver_id)
                .passenger_id(passenger_id)
                .build()?,
        );

        let driver = self.drivers.get_mut(&driver_id).ok_or(DispatchError::NotFound {
            entity: EntityKind::Driver,
            id: driver_id,
        })?;
        if !driver.is_available() {
            return Err(DispatchError::validation(format!(
                "driver {driver_id} is not available"
            )));
        }
        let passenger = self.passengers.get_mut(&passenger_id).ok_or(DispatchError::NotFound {
            entity: EntityKind::Passenger,
            id: passenger_id,
        })?;

        trip.connect(driver, passenger)?;
        driver.mark_unavailable();
        self.trips.push(Rc::clone(&trip));

        tracing::info!(trip_id, driver_id, passenger_id, "dispatched trip");
        Ok(trip)
    }

    /// Ids are never reused: one past the largest id seen so far.
    fn next_trip_id(&self) -> Result<Id, DispatchError> {
        self.trips
            .iter()
            .map(|trip| trip.id())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| DispatchError::validation("trip id space exhausted"))
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::collect(self)
    }
}

impl fmt::Debug for TripDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripDispatcher")
            .field("drivers", &self.drivers.len())
            .field("passengers", &self.passengers.len())
            .field("trips", &self.trips.len())
            .field("revenue_policy", &self.revenue_policy)
            .finish()
    }
}
