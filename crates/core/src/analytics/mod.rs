//! Booking analytics.
//!
//! This module turns booking records into dashboard aggregates:
//! - Numeric field cleaning with lenient and strict modes
//! - Date parsing, date ranges, and period presets
//! - Breakdowns, percentages, and pie slices
//! - The booking funnel and performance ratios
//! - Monthly revenue trend and location performance
//! - The aggregation service producing `DashboardData`

pub mod breakdown;
pub mod clean;
pub mod date;
pub mod error;
pub mod funnel;
pub mod performance;
pub mod service;
pub mod trend;
pub mod types;

#[cfg(test)]
mod tests;

pub use breakdown::{Breakdown, PALETTE, PieSlice, UNKNOWN, percentage_of, round_half_up};
pub use clean::{AmountReader, MAX_AMOUNT, ParsedAmount, clean_amount, parse_amount};
pub use date::{DateRange, PeriodPreset, parse_booking_date};
pub use error::AnalyticsError;
pub use funnel::FunnelCounts;
pub use performance::PerformanceInputs;
pub use service::{
    AnalyticsService, CANCELED, COMPLETED, CONFIRMED, status_label, status_matches,
};
pub use types::{
    AnalyticsOptions, CURRENCY, DashboardData, DashboardStats, DataQuality, DataSource,
    FunnelStage, LocationPoint, PaymentMethods, PerformanceIndicators, RevenuePoint,
};
