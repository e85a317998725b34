//! Driver payout rules for computing revenue from trip fares.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Share of the fare (after the fixed fee) paid out to the driver.
pub const DRIVER_SHARE: Decimal = dec!(0.8);

/// Fixed per-trip fee deducted from the fare before the driver share is applied.
pub const PER_TRIP_FEE: Decimal = dec!(1.65);

/// Minor-unit precision for currency amounts returned to callers.
pub const CURRENCY_DECIMALS: u32 = 2;

/// How much of each fare a driver keeps.
///
/// Formula: `payout = (cost - per_trip_fee) * driver_share`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenuePolicy {
    pub driver_share: Decimal,
    pub per_trip_fee: Decimal,
}

impl Default for RevenuePolicy {
    fn default() -> Self {
        Self {
            driver_share: DRIVER_SHARE,
            per_trip_fee: PER_TRIP_FEE,
        }
    }
}

impl RevenuePolicy {
    /// Unrounded driver payout for a single fare.
    pub fn driver_payout(&self, cost: Decimal) -> Decimal {
        (cost - self.per_trip_fee) * self.driver_share
    }

    /// Sum of payouts over every fare, rounded once to currency precision.
    pub fn total_payout<I>(&self, costs: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        let total: Decimal = costs.into_iter().map(|cost| self.driver_payout(cost)).sum();
        round_currency(total)
    }
}

/// Round half away from zero to two decimals.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}
