//! Test helpers for common test setup and utilities.
//!
//! [`sample_records`] mirrors the CSV fixtures under `tests/fixtures/test_data`:
//! three drivers (driver 1 unavailable), eight passengers and five trips, the last
//! of which is still in progress.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::driver::{Driver, DriverStatus};
use crate::identified::Id;
use crate::passenger::Passenger;
use crate::records::{DriverRecord, InMemoryRecords, PassengerRecord, TripRecord};

/// A well-formed 17 character VIN.
pub const TEST_VIN: &str = "12345678901234567";

/// Parse an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if `raw` is not RFC 3339.
pub fn test_time(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("test timestamps should be RFC 3339")
        .with_timezone(&Utc)
}

pub fn test_driver(id: Id) -> Driver {
    test_driver_with_status(id, DriverStatus::Available)
}

pub fn test_driver_with_status(id: Id, status: DriverStatus) -> Driver {
    Driver::with_status(id, format!("Test Driver {id}"), TEST_VIN, status)
        .expect("test driver should be valid")
}

pub fn test_passenger(id: Id) -> Passenger {
    Passenger::new(id, format!("Test Passenger {id}"), "412-432-7640")
        .expect("test passenger should be valid")
}

/// A finished one-hour trip with a fare of 10 and a rating of 4.
pub fn trip_record(id: Id, driver_id: Id, passenger_id: Id) -> TripRecord {
    TripRecord {
        id,
        driver_id,
        passenger_id,
        start_time: test_time("2018-09-01T10:00:00Z"),
        end_time: Some(test_time("2018-09-01T11:00:00Z")),
        cost: Some(dec!(10)),
        rating: Some(4),
    }
}

fn sample_trip(
    id: Id,
    driver_id: Id,
    passenger_id: Id,
    start: &str,
    end: Option<&str>,
    cost: Option<Decimal>,
    rating: Option<i64>,
) -> TripRecord {
    TripRecord {
        id,
        driver_id,
        passenger_id,
        start_time: test_time(start),
        end_time: end.map(test_time),
        cost,
        rating,
    }
}

pub fn sample_records() -> InMemoryRecords {
    let drivers = vec![
        DriverRecord {
            id: 1,
            name: "Driver 1".to_string(),
            vin: "1B6CF40K1J3Y74UY2".to_string(),
            status: Some(DriverStatus::Unavailable),
        },
        DriverRecord {
            id: 2,
            name: "Driver 2".to_string(),
            vin: "1B7GG2AX1JT291412".to_string(),
            status: Some(DriverStatus::Available),
        },
        DriverRecord {
            id: 3,
            name: "Driver 3".to_string(),
            vin: "WBWSS52P9NEYLVDE9".to_string(),
            status: None,
        },
    ];

    let passengers = (1..=8)
        .map(|id| PassengerRecord {
            id,
            name: format!("Passenger {id}"),
            phone_num: format!("555-010-{id:04}"),
        })
        .collect();

    let trips = vec![
        sample_trip(
            1,
            1,
            1,
            "2018-05-25T18:52:40Z",
            Some("2018-05-25T19:25:00Z"),
            Some(dec!(10)),
            Some(5),
        ),
        sample_trip(
            2,
            1,
            2,
            "2018-07-23T11:39:00Z",
            Some("2018-07-23T11:55:00Z"),
            Some(dec!(7)),
            Some(3),
        ),
        sample_trip(
            3,
            2,
            4,
            "2018-06-12T05:22:00Z",
            Some("2018-06-12T05:50:00Z"),
            Some(dec!(23)),
            Some(2),
        ),
        sample_trip(
            4,
            2,
            7,
            "2018-12-15T20:10:00Z",
            Some("2018-12-15T20:40:00Z"),
            Some(dec!(17.39)),
            Some(4),
        ),
        sample_trip(5, 1, 6, "2018-08-05T15:58:00Z", None, None, None),
    ];

    InMemoryRecords {
        drivers,
        passengers,
        trips,
    }
}
