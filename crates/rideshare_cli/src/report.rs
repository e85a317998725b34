//! Plain-text rendering of entities and summaries.

use std::fmt::Write;
use std::rc::Rc;

use rideshare_core::summary::DatasetSummary;
use rideshare_core::{Driver, Passenger, Trip, TripDispatcher};

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn render_summary(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Dataset summary ---");
    let _ = writeln!(
        out,
        "Drivers: {} ({} available, {} unavailable)",
        summary.drivers(),
        summary.drivers_available,
        summary.drivers_unavailable
    );
    let _ = writeln!(out, "Passengers: {}", summary.passengers);
    let _ = writeln!(
        out,
        "Trips: {} ({} in progress)",
        summary.trips, summary.trips_in_progress
    );
    let _ = writeln!(out, "Driver revenue: {}", summary.total_driver_revenue);
    let _ = writeln!(out, "Passenger spend: {}", summary.total_passenger_spend);
    let _ = write!(out, "Mean driver rating: {:.2}", summary.mean_driver_rating);
    out
}

pub fn render_driver(driver: &Driver) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Driver {} ({})", driver.id(), driver.name());
    let _ = writeln!(out, "  VIN: {}", driver.vin());
    let _ = writeln!(out, "  Status: {}", driver.status());
    let _ = writeln!(
        out,
        "  Trips: {} ({} completed)",
        driver.trips().len(),
        driver.completed_trip_count()
    );
    let _ = writeln!(out, "  Average rating: {:.2}", driver.average_rating());
    let _ = writeln!(out, "  Total revenue: {}", driver.calculate_total_revenue());
    let _ = write!(out, "  Time driving: {:.1} min", driver.total_time_driving());
    out
}

pub fn render_passenger(passenger: &Passenger) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Passenger {} ({})", passenger.id(), passenger.name());
    let _ = writeln!(out, "  Phone: {}", passenger.phone_number());
    let _ = writeln!(out, "  Trips: {}", passenger.trips().len());
    let _ = writeln!(out, "  Net expenditures: {}", passenger.net_expenditures());
    let _ = write!(out, "  Time spent: {:.1} min", passenger.total_time_spent());
    out
}

fn render_trip_line(trip: &Trip) -> String {
    format!(
        "{:>5}  driver={:<4} passenger={:<4} start={}  end={}  cost={}  rating={}",
        trip.id(),
        trip.driver_id(),
        trip.passenger_id(),
        trip.start_time(),
        or_dash(trip.end_time()),
        or_dash(trip.cost()),
        or_dash(trip.rating()),
    )
}

pub fn render_trips(trips: &[Rc<Trip>]) -> String {
    trips
        .iter()
        .map(|trip| render_trip_line(trip))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_dispatched(dispatcher: &TripDispatcher, trip: &Trip) -> String {
    let driver = dispatcher
        .driver_of(trip)
        .map(|d| format!("{} ({})", d.name(), d.id()))
        .unwrap_or_else(|| trip.driver_id().to_string());
    let passenger = dispatcher
        .passenger_of(trip)
        .map(|p| format!("{} ({})", p.name(), p.id()))
        .unwrap_or_else(|| trip.passenger_id().to_string());
    format!(
        "Dispatched trip {}\n  Driver: {}\n  Passenger: {}\n  Started: {}",
        trip.id(),
        driver,
        passenger,
        trip.start_time()
    )
}

#[cfg(test)]
mod tests {
    use rideshare_core::clock::FixedClock;
    use rideshare_core::test_helpers::{sample_records, test_time};

    use super::*;

    fn dispatcher() -> TripDispatcher {
        TripDispatcher::load(&sample_records())
            .unwrap()
            .with_clock(FixedClock(test_time("2019-01-01T08:00:00Z")))
    }

    #[test]
    fn summary_lists_counts_and_totals() {
        let text = render_summary(&dispatcher().summary());
        assert!(text.contains("Drivers: 3 (2 available, 1 unavailable)"));
        assert!(text.contains("Trips: 5 (1 in progress)"));
        assert!(text.contains("Driver revenue: 40.63"));
    }

    #[test]
    fn driver_report_shows_aggregates() {
        let dispatcher = dispatcher();
        let text = render_driver(dispatcher.find_driver(1).unwrap());
        assert!(text.contains("Status: UNAVAILABLE"));
        assert!(text.contains("Average rating: 4.00"));
        assert!(text.contains("Total revenue: 10.96"));
    }

    #[test]
    fn passenger_report_shows_spend_and_time() {
        let dispatcher = dispatcher();
        let text = render_passenger(dispatcher.find_passenger(4).unwrap());
        assert!(text.starts_with("Passenger 4 (Passenger 4)"));
        assert!(text.contains("  Net expenditures: 23\n"));
        assert!(text.ends_with("  Time spent: 28.0 min"));
    }

    #[test]
    fn open_trip_prints_dashes() {
        let dispatcher = dispatcher();
        let text = render_trips(dispatcher.trips());
        let last = text.lines().last().unwrap();
        assert!(last.contains("end=-  cost=-  rating=-"));
    }

    #[test]
    fn dispatched_trip_names_driver() {
        let mut dispatcher = dispatcher();
        let trip = dispatcher.request_trip(1).unwrap();
        let text = render_dispatched(&dispatcher, &trip);
        assert!(text.starts_with("Dispatched trip 6"));
        assert!(text.contains("Driver: Driver 2 (2)"));
    }
}
