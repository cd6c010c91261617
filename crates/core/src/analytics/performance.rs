//! Performance ratios and the business health score.

use rust_decimal::prelude::*;

use super::breakdown::{ratio_percent, round_half_up};
use super::types::PerformanceIndicators;

/// Order value that scores 100 on the health scale.
const AOV_TARGET: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Raw counts the performance ratios are derived from.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceInputs {
    /// Bookings in range.
    pub bookings: u64,
    /// Bookings with a positive paid amount.
    pub paid: u64,
    /// Canceled bookings.
    pub canceled: u64,
    /// Bookings with a positive up-sell amount.
    pub upsold: u64,
    /// Total booked revenue.
    pub revenue: Decimal,
}

impl PerformanceIndicators {
    /// Computes the ratios; every ratio is 0 when there are no bookings.
    #[must_use]
    pub fn compute(inputs: &PerformanceInputs) -> Self {
        let bookings = Decimal::from(inputs.bookings);
        let average_order_value = if bookings.is_zero() {
            Decimal::ZERO
        } else {
            round_half_up(inputs.revenue / bookings, 0)
        };

        Self {
            payment_completion_rate: ratio_percent(Decimal::from(inputs.paid), bookings, 2),
            average_order_value,
            cancellation_rate: ratio_percent(Decimal::from(inputs.canceled), bookings, 2),
            upsell_rate: ratio_percent(Decimal::from(inputs.upsold), bookings, 2),
        }
    }

    /// Blends the ratios into a 0-100 score.
    ///
    /// `round((completion + aov / 500 * 100 + (100 - cancellation * 2) + upsell * 2) / 4)`,
    /// clamped to the scale.
    #[must_use]
    pub fn business_health(&self) -> u8 {
        let two = Decimal::TWO;
        let sum = self.payment_completion_rate
            + self.average_order_value / AOV_TARGET * Decimal::ONE_HUNDRED
            + (Decimal::ONE_HUNDRED - self.cancellation_rate * two)
            + self.upsell_rate * two;
        let score = round_half_up(sum / Decimal::from(4), 0)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        score.to_u8().unwrap_or_default()
    }
}
