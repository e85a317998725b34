use rust_decimal::Decimal;

use crate::pricing::RevenuePolicy;
use crate::selection::SelectionPolicyKind;

/// Tunables for a [`TripDispatcher`](crate::dispatcher::TripDispatcher).
///
/// The record source is passed to the dispatcher separately; nothing here names a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchConfig {
    /// Payout rule used for dataset-wide revenue figures.
    pub revenue_policy: RevenuePolicy,
    /// Driver selection policy for new trip requests. Defaults to first available.
    pub selection: SelectionPolicyKind,
}

impl DispatchConfig {
    pub fn with_selection(mut self, selection: SelectionPolicyKind) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_revenue_policy(mut self, revenue_policy: RevenuePolicy) -> Self {
        self.revenue_policy = revenue_policy;
        self
    }

    /// Override the driver share, keeping the current per-trip fee.
    pub fn with_driver_share(mut self, driver_share: Decimal) -> Self {
        self.revenue_policy.driver_share = driver_share;
        self
    }

    /// Override the per-trip fee, keeping the current driver share.
    pub fn with_per_trip_fee(mut self, per_trip_fee: Decimal) -> Self {
        self.revenue_policy.per_trip_fee = per_trip_fee;
        self
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_standard_policy() {
        let config = DispatchConfig::default();
        assert_eq!(config.selection, SelectionPolicyKind::FirstAvailable);
        assert_eq!(config.revenue_policy, RevenuePolicy::default());
    }

    #[test]
    fn builders_override_single_fields() {
        let config = DispatchConfig::default()
            .with_selection(SelectionPolicyKind::LongestIdle)
            .with_per_trip_fee(dec!(2));

        assert_eq!(config.selection, SelectionPolicyKind::LongestIdle);
        assert_eq!(config.revenue_policy.per_trip_fee, dec!(2));
        assert_eq!(config.revenue_policy.driver_share, dec!(0.8));
    }
}
