mod support;

use std::fs;

use rideshare_core::csv_source::{CsvDirectory, DRIVERS_FILE, PASSENGERS_FILE, TRIPS_FILE};
use rideshare_core::records::RecordSource;
use rideshare_core::{DispatchError, TripDispatcher};
use support::{fixture_dir, fixture_source, TEST_DATA};

fn copy_fixture_into(dir: &std::path::Path) {
    for file in [DRIVERS_FILE, PASSENGERS_FILE, TRIPS_FILE] {
        fs::copy(fixture_dir(TEST_DATA).join(file), dir.join(file)).unwrap();
    }
}

#[test]
fn fixture_record_counts() {
    let source = fixture_source(TEST_DATA);
    assert_eq!(source.driver_records().unwrap().len(), 3);
    assert_eq!(source.passenger_records().unwrap().len(), 8);
    assert_eq!(source.trip_records().unwrap().len(), 5);
}

#[test]
fn dangling_driver_reference_is_a_data_integrity_error() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixture_into(dir.path());
    let mut trips = fs::read_to_string(dir.path().join(TRIPS_FILE)).unwrap();
    trips.push_str("6,9,1,2018-09-01 10:00:00 -0700,2018-09-01 10:30:00 -0700,12,5\n");
    fs::write(dir.path().join(TRIPS_FILE), trips).unwrap();

    let err = TripDispatcher::load(&CsvDirectory::new(dir.path())).unwrap_err();

    assert!(err.is_data_integrity(), "unexpected error: {err}");
}

#[test]
fn malformed_vin_fails_load_with_validation() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixture_into(dir.path());
    fs::write(
        dir.path().join(DRIVERS_FILE),
        "id,name,vin,status\n1,Driver 1,SHORTVIN,AVAILABLE\n",
    )
    .unwrap();

    let err = TripDispatcher::load(&CsvDirectory::new(dir.path())).unwrap_err();

    assert!(err.is_validation());
}

#[test]
fn missing_directory_surfaces_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TripDispatcher::load(&CsvDirectory::new(dir.path().join("nope"))).unwrap_err();
    assert!(matches!(err, DispatchError::Source(_)));
}

#[test]
fn unknown_status_is_a_csv_error() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixture_into(dir.path());
    fs::write(
        dir.path().join(DRIVERS_FILE),
        "id,name,vin,status\n1,Driver 1,1B6CF40K1J3Y74UY2,ON_BREAK\n",
    )
    .unwrap();

    let err = CsvDirectory::new(dir.path()).driver_records().unwrap_err();
    assert!(err.to_string().contains("drivers.csv"));
}
