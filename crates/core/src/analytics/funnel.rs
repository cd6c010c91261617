//! Booking funnel.

use rust_decimal::Decimal;

use super::breakdown::ratio_percent;
use super::types::FunnelStage;

/// Booking counts at each funnel stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunnelCounts {
    /// Every booking in range.
    pub inquiries: u64,
    /// Bookings with status Confirmed.
    pub confirmed: u64,
    /// Bookings with status Completed.
    pub completed: u64,
    /// Bookings with a positive paid amount.
    pub paid: u64,
    /// Bookings the branch manager rated.
    pub rated: u64,
}

impl FunnelCounts {
    /// Stage labels in funnel order.
    pub const STAGES: [&'static str; 5] = ["Inquiries", "Confirmed", "Completed", "Paid", "Rated"];

    /// Counts in funnel order.
    #[must_use]
    pub const fn as_array(&self) -> [u64; 5] {
        [
            self.inquiries,
            self.confirmed,
            self.completed,
            self.paid,
            self.rated,
        ]
    }

    /// Builds the funnel stages.
    ///
    /// The first stage has rate 100; later stages are the whole percent of the
    /// previous stage, 0 when the previous stage is empty.
    #[must_use]
    pub fn stages(&self) -> Vec<FunnelStage> {
        let counts = self.as_array();
        Self::STAGES
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let rate = if i == 0 {
                    Decimal::ONE_HUNDRED
                } else {
                    ratio_percent(Decimal::from(counts[i]), Decimal::from(counts[i - 1]), 0)
                };
                FunnelStage {
                    stage: (*stage).to_string(),
                    users: counts[i],
                    rate,
                }
            })
            .collect()
    }

    /// Returns true if no stage has more bookings than the one before it.
    #[must_use]
    pub fn is_non_increasing(&self) -> bool {
        self.as_array().windows(2).all(|pair| pair[1] <= pair[0])
    }
}
