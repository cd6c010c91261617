//! Monthly revenue trend and location performance.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::breakdown::{ratio_percent, round_half_up};
use super::types::{LocationPoint, RevenuePoint};

/// Months kept in the revenue trend.
pub const TREND_MONTHS: usize = 12;

/// Locations kept in the performance chart.
pub const TOP_LOCATIONS: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    revenue: Decimal,
    bookings: u64,
}

impl Bucket {
    fn add(&mut self, revenue: Decimal) {
        self.revenue = self.revenue.saturating_add(revenue);
        self.bookings += 1;
    }
}

/// Accumulates revenue per calendar month.
#[derive(Debug, Default)]
pub struct MonthlyTrend {
    months: BTreeMap<NaiveDate, Bucket>,
}

impl MonthlyTrend {
    /// Adds a dated booking; `month` is the first day of its month.
    pub fn add(&mut self, month: NaiveDate, revenue: Decimal) {
        self.months.entry(month).or_default().add(revenue);
    }

    /// Chronological points for the most recent months.
    ///
    /// Growth compares each month with the previous kept month and is 0 for
    /// the first point or when the previous month had no revenue.
    #[must_use]
    pub fn points(&self) -> Vec<RevenuePoint> {
        let skip = self.months.len().saturating_sub(TREND_MONTHS);
        let mut previous: Option<Decimal> = None;

        self.months
            .iter()
            .skip(skip)
            .map(|(month, bucket)| {
                let growth = previous.map_or(Decimal::ZERO, |prev| {
                    ratio_percent(bucket.revenue.saturating_sub(prev), prev, 1)
                });
                previous = Some(bucket.revenue);
                RevenuePoint {
                    month: month.format("%b").to_string(),
                    value: round_half_up(bucket.revenue, 0),
                    growth,
                    bookings: bucket.bookings,
                }
            })
            .collect()
    }
}

/// Accumulates revenue per location.
#[derive(Debug, Default)]
pub struct LocationPerformance {
    locations: BTreeMap<String, Bucket>,
}

impl LocationPerformance {
    /// Adds a booking at `location`.
    pub fn add(&mut self, location: &str, revenue: Decimal) {
        self.locations
            .entry(location.to_string())
            .or_default()
            .add(revenue);
    }

    /// The top locations by revenue, ties by name.
    #[must_use]
    pub fn top(&self) -> Vec<LocationPoint> {
        let mut ranked: Vec<(&String, &Bucket)> = self.locations.iter().collect();
        ranked.sort_by(|a, b| b.1.revenue.cmp(&a.1.revenue).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .take(TOP_LOCATIONS)
            .map(|(location, bucket)| LocationPoint {
                location: location.clone(),
                revenue: round_half_up(bucket.revenue, 0),
                bookings: bucket.bookings,
                average_order_value: if bucket.bookings == 0 {
                    Decimal::ZERO
                } else {
                    round_half_up(bucket.revenue / Decimal::from(bucket.bookings), 2)
                },
            })
            .collect()
    }
}
