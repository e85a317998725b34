//! In-memory ride-sharing ledger: drivers, passengers and the trips that link them.
//!
//! Records are read from a [`RecordSource`](records::RecordSource), cross-linked into
//! the [`TripDispatcher`](dispatcher::TripDispatcher) registry, and queried for
//! per-entity aggregates. New trips are dispatched to an available driver under a
//! deterministic [`DriverSelection`](selection::DriverSelection) policy.
//!
//! # Quick Start
//!
//! ```no_run
//! use rideshare_core::csv_source::CsvDirectory;
//! use rideshare_core::dispatcher::TripDispatcher;
//!
//! let source = CsvDirectory::new("support");
//! let mut dispatcher = TripDispatcher::load(&source).unwrap();
//!
//! let trip = dispatcher.request_trip(1).unwrap();
//! let driver = dispatcher.driver_of(&trip).unwrap();
//! println!("trip {} assigned to {}", trip.id(), driver.name());
//! ```
//!
//! # Ownership
//!
//! The dispatcher owns every driver and passenger. Trips are immutable and shared
//! through `Rc`: drivers and passengers keep handles to their trips, while a trip
//! only stores the ids of its driver and passenger. Resolving a trip back to its
//! entities goes through the dispatcher, so there are no reference cycles.

pub mod clock;
pub mod config;
pub mod csv_source;
pub mod dispatcher;
pub mod driver;
pub mod error;
pub mod identified;
pub mod passenger;
pub mod pricing;
pub mod records;
pub mod selection;
pub mod summary;
pub mod trip;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::DispatchConfig;
pub use dispatcher::TripDispatcher;
pub use driver::{Driver, DriverStatus};
pub use error::{DispatchError, RecordSourceError};
pub use identified::{EntityKind, Id, Identified};
pub use passenger::Passenger;
pub use pricing::RevenuePolicy;
pub use trip::{Trip, TripBuilder};
