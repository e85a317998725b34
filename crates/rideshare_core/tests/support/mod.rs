#![allow(dead_code)]

use std::path::PathBuf;

use rideshare_core::clock::FixedClock;
use rideshare_core::csv_source::CsvDirectory;
use rideshare_core::test_helpers::test_time;
use rideshare_core::TripDispatcher;

/// Fixture dataset with one unavailable and two available drivers.
pub const TEST_DATA: &str = "test_data";

/// Fixture dataset where every driver is unavailable.
pub const TEST_DATA_NO_DRIVERS: &str = "test_data2";

pub fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_source(name: &str) -> CsvDirectory {
    CsvDirectory::new(fixture_dir(name))
}

/// Dispatcher over a fixture dataset with a pinned clock.
pub fn build_test_dispatcher(name: &str) -> TripDispatcher {
    TripDispatcher::load(&fixture_source(name))
        .expect("fixture dataset should load")
        .with_clock(FixedClock(test_time("2019-01-01T08:00:00Z")))
}
