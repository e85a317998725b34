//! Dataset-wide counts and totals, computed on demand from the dispatcher.

use rust_decimal::Decimal;

use crate::dispatcher::TripDispatcher;
use crate::pricing::round_currency;

/// Aggregated view of a loaded dataset at a point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub drivers_available: usize,
    pub drivers_unavailable: usize,
    pub passengers: usize,
    pub trips: usize,
    pub trips_in_progress: usize,
    /// Sum of every driver's revenue under the dispatcher's revenue policy.
    pub total_driver_revenue: Decimal,
    /// Sum of every passenger's net expenditures.
    pub total_passenger_spend: Decimal,
    /// Mean of per-driver average ratings, over drivers with at least one rated trip.
    pub mean_driver_rating: f64,
}

impl DatasetSummary {
    pub fn collect(dispatcher: &TripDispatcher) -> Self {
        let policy = dispatcher.revenue_policy();
        let mut summary = DatasetSummary {
            passengers: dispatcher.passengers().len(),
            trips: dispatcher.trips().len(),
            trips_in_progress: dispatcher
                .trips()
                .iter()
                .filter(|trip| trip.is_in_progress())
                .count(),
            ..Default::default()
        };

        let mut rated_drivers = 0usize;
        let mut rating_sum = 0.0;
        let mut revenue = Decimal::ZERO;
        for driver in dispatcher.drivers() {
            if driver.is_available() {
                summary.drivers_available += 1;
            } else {
                summary.drivers_unavailable += 1;
            }
            revenue += driver.total_revenue_with(policy);
            if driver.trips().iter().any(|trip| trip.rating().is_some()) {
                rated_drivers += 1;
                rating_sum += driver.average_rating();
            }
        }
        summary.total_driver_revenue = round_currency(revenue);
        summary.total_passenger_spend = dispatcher
            .passengers()
            .map(|passenger| passenger.net_expenditures())
            .sum();
        if rated_drivers > 0 {
            summary.mean_driver_rating = rating_sum / rated_drivers as f64;
        }
        summary
    }

    pub fn drivers(&self) -> usize {
        self.drivers_available + self.drivers_unavailable
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::clock::FixedClock;
    use crate::test_helpers::{sample_records, test_time};

    #[test]
    fn summarizes_sample_dataset() {
        let dispatcher = TripDispatcher::load(&sample_records()).unwrap();
        let summary = dispatcher.summary();

        assert_eq!(summary.drivers(), 3);
        assert_eq!(summary.drivers_available, 2);
        assert_eq!(summary.drivers_unavailable, 1);
        assert_eq!(summary.passengers, 8);
        assert_eq!(summary.trips, 5);
        assert_eq!(summary.trips_in_progress, 1);
        // Driver 1: 10.96, driver 2: (23 - 1.65) * 0.8 + (17.39 - 1.65) * 0.8 = 29.672
        assert_eq!(summary.total_driver_revenue, dec!(40.63));
        assert_eq!(summary.total_passenger_spend, dec!(57.39));
        // Driver 1 averages 4.0, driver 2 averages 3.0.
        assert!((summary.mean_driver_rating - 3.5).abs() < 1e-9);
    }

    #[test]
    fn dispatch_moves_driver_to_unavailable() {
        let mut dispatcher = TripDispatcher::load(&sample_records())
            .unwrap()
            .with_clock(FixedClock(test_time("2019-01-01T00:00:00Z")));
        dispatcher.request_trip(3).unwrap();

        let summary = dispatcher.summary();
        assert_eq!(summary.drivers_available, 1);
        assert_eq!(summary.trips_in_progress, 2);
    }

    #[test]
    fn empty_dataset_is_all_zero() {
        let dispatcher = TripDispatcher::load(&crate::records::InMemoryRecords::default()).unwrap();
        assert_eq!(dispatcher.summary(), DatasetSummary::default());
    }
}
