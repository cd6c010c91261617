//! Dashboard output types.
//!
//! Field names serialise in camelCase; several keep legacy chart names the
//! dashboard UI binds to (`serverUptime` carries the payment completion rate,
//! location points use `date`/`active`/`new`/`retention`).

use std::collections::BTreeMap;

use bookgx_shared::ParseMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::breakdown::PieSlice;

/// Currency code of every amount.
pub const CURRENCY: &str = "SAR";

/// Where the dashboard records came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Live sheet data.
    #[default]
    GoogleSheets,
    /// Built-in sample data used when the sheet cannot be fetched.
    MockData,
}

/// Aggregation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsOptions {
    /// How malformed amounts are handled.
    pub parse_mode: ParseMode,
}

/// One month of the revenue trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Short month name, such as `"Jan"`.
    pub month: String,
    /// Revenue in whole SAR.
    pub value: Decimal,
    /// Percent change against the previous month, 1 decimal place.
    pub growth: Decimal,
    /// Number of bookings in the month.
    pub bookings: u64,
}

/// Performance of one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPoint {
    /// Location label.
    #[serde(rename = "date")]
    pub location: String,
    /// Revenue in whole SAR.
    #[serde(rename = "active")]
    pub revenue: Decimal,
    /// Number of bookings.
    #[serde(rename = "new")]
    pub bookings: u64,
    /// Average order value, 2 decimal places.
    #[serde(rename = "retention")]
    pub average_order_value: Decimal,
}

/// One stage of the booking funnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    /// Stage label.
    pub stage: String,
    /// Bookings that reached the stage.
    pub users: u64,
    /// Whole percent of the previous stage.
    pub rate: Decimal,
}

/// Headline performance ratios.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceIndicators {
    /// Share of bookings with a payment, 0-100.
    #[serde(rename = "serverUptime")]
    pub payment_completion_rate: Decimal,
    /// Average order value in whole SAR.
    #[serde(rename = "responseTime")]
    pub average_order_value: Decimal,
    /// Share of canceled bookings, 0-100.
    #[serde(rename = "errorRate")]
    pub cancellation_rate: Decimal,
    /// Share of bookings with an up-sell, 0-100.
    #[serde(rename = "throughput")]
    pub upsell_rate: Decimal,
}

/// Headline stats and breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total booked revenue in whole SAR.
    pub total_revenue: Decimal,
    /// Distinct client names.
    pub total_users: u64,
    /// Completed bookings as a share of all bookings, 2 decimal places.
    pub conversion_rate: Decimal,
    /// Revenue per booking, 2 decimal places.
    pub avg_order_value: Decimal,
    /// Bookings with any review field filled.
    pub total_reviews: u64,
    /// Reviewed bookings per status.
    pub reviews_by_status: BTreeMap<String, u64>,
    /// Revenue per status.
    pub revenue_by_status: BTreeMap<String, Decimal>,
    /// Channel share as one-decimal percentage strings.
    pub acquisition_channels: BTreeMap<String, String>,
    /// Nature share as one-decimal percentage strings.
    pub nature_booking: BTreeMap<String, String>,
    /// Revenue per location.
    pub location_data: Vec<PieSlice>,
    /// Bookings per channel.
    pub acquisition_pie_data: Vec<PieSlice>,
    /// Bookings per nature.
    pub nature_pie_data: Vec<PieSlice>,
    /// Bookings per status.
    pub status_pie_data: Vec<PieSlice>,
}

/// Summed payments per method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethods {
    /// Cash.
    pub cash: Decimal,
    /// Mada.
    pub mada: Decimal,
    /// Tabby.
    pub tabby: Decimal,
    /// Tamara.
    pub tamara: Decimal,
    /// Bank transfer.
    pub bank_transfer: Decimal,
}

/// Counters for cells the aggregator could not use as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    /// Amount cells that were not blank and not a clean number.
    pub malformed_amounts: usize,
    /// In-range records without a readable booking date.
    pub undated_records: usize,
}

/// Everything the dashboard renders, derived from one record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Monthly revenue trend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Vec<RevenuePoint>>,
    /// Top locations by revenue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<LocationPoint>>,
    /// Booking funnel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Vec<FunnelStage>>,
    /// Performance ratios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceIndicators>,
    /// Headline stats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DashboardStats>,
    /// Records in range.
    pub record_count: usize,
    /// Where the records came from.
    pub data_source: DataSource,
    /// Currency code.
    pub currency: String,
    /// Revenue per location.
    pub location_breakdown: BTreeMap<String, Decimal>,
    /// Summed payments per method.
    pub payment_methods: PaymentMethods,
    /// Bookings per channel.
    pub acquisition_channels: BTreeMap<String, u64>,
    /// Bookings per status.
    pub booking_statuses: BTreeMap<String, u64>,
    /// Health score, 0-100.
    pub business_health: u8,
    /// Data quality counters.
    pub data_quality: DataQuality,
}

impl DashboardData {
    /// Tags the data with its source.
    #[must_use]
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.data_source = source;
        self
    }
}
