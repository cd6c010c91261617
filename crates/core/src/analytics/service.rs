//! Dashboard aggregation service.
//!
//! One pass over the in-range bookings feeds every breakdown, scalar, and
//! chart series. Amounts are cleaned once per booking through an
//! [`AmountReader`] so every money column shares the same parse mode.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::breakdown::{Breakdown, group_label, ratio_percent, round_half_up};
use super::clean::AmountReader;
use super::date::{DateRange, first_of_month, parse_booking_date};
use super::error::AnalyticsError;
use super::funnel::FunnelCounts;
use super::performance::PerformanceInputs;
use super::trend::{LocationPerformance, MonthlyTrend};
use super::types::{
    AnalyticsOptions, CURRENCY, DashboardData, DashboardStats, DataQuality, DataSource,
    PaymentMethods, PerformanceIndicators,
};
use crate::records::{BookingRecord, columns};

/// Status label of confirmed bookings.
pub const CONFIRMED: &str = "Confirmed";
/// Status label of completed bookings.
pub const COMPLETED: &str = "Completed";
/// Status label of canceled bookings.
pub const CANCELED: &str = "Canceled";

const CANCELED_ALIAS: &str = "Cancelled";

/// Returns true if a raw status cell denotes `status`.
///
/// Matching ignores case and surrounding whitespace; `Cancelled` counts as
/// `Canceled`.
#[must_use]
pub fn status_matches(raw: &str, status: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case(status)
        || (status == CANCELED && raw.eq_ignore_ascii_case(CANCELED_ALIAS))
}

/// Returns the label a status cell is grouped under.
///
/// Known statuses take their canonical spelling (`cancelled` groups as
/// `Canceled`); other labels are kept as written, trimmed.
#[must_use]
pub fn status_label(raw: &str) -> &str {
    for status in [CONFIRMED, COMPLETED, CANCELED] {
        if status_matches(raw, status) {
            return status;
        }
    }
    raw.trim()
}

/// Cleaned money columns of one booking.
#[derive(Debug, Clone, Default)]
struct BookingAmounts {
    total_book: Decimal,
    total_paid: Decimal,
    total_book_plus: Decimal,
    payments: PaymentMethods,
}

impl BookingAmounts {
    fn read(
        booking: &BookingRecord,
        row: usize,
        reader: &mut AmountReader,
    ) -> Result<Self, AnalyticsError> {
        let mut read = |column: &str| reader.read(booking.get(column), row, column);

        Ok(Self {
            total_book: read(columns::TOTAL_BOOK)?,
            total_paid: read(columns::TOTAL_PAID)?,
            total_book_plus: read(columns::TOTAL_BOOK_PLUS)?,
            payments: PaymentMethods {
                cash: read(columns::CASH)?,
                mada: read(columns::MADA)?,
                tabby: read(columns::TABBY)?,
                tamara: read(columns::TAMARA)?,
                bank_transfer: read(columns::BANK_TRANSFER)?,
            },
        })
    }
}

/// Running totals for one aggregation pass.
#[derive(Debug, Default)]
struct Accumulator {
    bookings: u64,
    undated: usize,
    revenue: Decimal,
    clients: BTreeSet<String>,
    revenue_by_location: Breakdown,
    revenue_by_status: Breakdown,
    count_by_status: Breakdown,
    count_by_channel: Breakdown,
    count_by_nature: Breakdown,
    reviews_by_status: Breakdown,
    reviews: u64,
    funnel: FunnelCounts,
    canceled: u64,
    upsold: u64,
    payments: PaymentMethods,
    trend: MonthlyTrend,
    locations: LocationPerformance,
}

impl Accumulator {
    fn add(&mut self, booking: &BookingRecord, amounts: &BookingAmounts) {
        let status = status_label(booking.status());

        self.bookings += 1;
        self.revenue = self.revenue.saturating_add(amounts.total_book);

        let client = booking.client_name();
        if !client.is_empty() {
            self.clients.insert(client.to_string());
        }

        self.revenue_by_location.add(booking.location(), amounts.total_book);
        self.revenue_by_status.add(status, amounts.total_book);
        self.count_by_status.increment(status);
        self.count_by_channel.increment(booking.acquisition_channel());
        self.count_by_nature.increment(booking.nature());
        self.locations
            .add(group_label(booking.location()), amounts.total_book);

        if booking.has_review() {
            self.reviews += 1;
            self.reviews_by_status.increment(status);
        }

        self.funnel.inquiries += 1;
        if status_matches(status, CONFIRMED) {
            self.funnel.confirmed += 1;
        }
        if status_matches(status, COMPLETED) {
            self.funnel.completed += 1;
        }
        if amounts.total_paid > Decimal::ZERO {
            self.funnel.paid += 1;
        }
        if booking.has_manager_rating() {
            self.funnel.rated += 1;
        }

        if status_matches(status, CANCELED) {
            self.canceled += 1;
        }
        if amounts.total_book_plus > Decimal::ZERO {
            self.upsold += 1;
        }

        let (sums, added) = (&mut self.payments, &amounts.payments);
        sums.cash = sums.cash.saturating_add(added.cash);
        sums.mada = sums.mada.saturating_add(added.mada);
        sums.tabby = sums.tabby.saturating_add(added.tabby);
        sums.tamara = sums.tamara.saturating_add(added.tamara);
        sums.bank_transfer = sums.bank_transfer.saturating_add(added.bank_transfer);

        match parse_booking_date(booking.booking_date()) {
            Some(date) => self.trend.add(first_of_month(date), amounts.total_book),
            None => self.undated += 1,
        }
    }

    fn finish(self, malformed_amounts: usize) -> DashboardData {
        let bookings = Decimal::from(self.bookings);
        let avg_order_value = if bookings.is_zero() {
            Decimal::ZERO
        } else {
            round_half_up(self.revenue / bookings, 2)
        };

        let performance = PerformanceIndicators::compute(&PerformanceInputs {
            bookings: self.bookings,
            paid: self.funnel.paid,
            canceled: self.canceled,
            upsold: self.upsold,
            revenue: self.revenue,
        });
        let business_health = performance.business_health();

        let stats = DashboardStats {
            total_revenue: round_half_up(self.revenue, 0),
            total_users: u64::try_from(self.clients.len()).unwrap_or(u64::MAX),
            conversion_rate: ratio_percent(Decimal::from(self.funnel.completed), bookings, 2),
            avg_order_value,
            total_reviews: self.reviews,
            reviews_by_status: self.reviews_by_status.counts(),
            revenue_by_status: self.revenue_by_status.totals(),
            acquisition_channels: self.count_by_channel.percentage_labels(),
            nature_booking: self.count_by_nature.percentage_labels(),
            location_data: self.revenue_by_location.pie_slices(),
            acquisition_pie_data: self.count_by_channel.pie_slices(),
            nature_pie_data: self.count_by_nature.pie_slices(),
            status_pie_data: self.count_by_status.pie_slices(),
        };

        DashboardData {
            revenue: Some(self.trend.points()),
            users: Some(self.locations.top()),
            conversion: Some(self.funnel.stages()),
            performance: Some(performance),
            stats: Some(stats),
            record_count: usize::try_from(self.bookings).unwrap_or(usize::MAX),
            data_source: DataSource::default(),
            currency: CURRENCY.to_string(),
            location_breakdown: self.revenue_by_location.totals(),
            payment_methods: self.payments,
            acquisition_channels: self.count_by_channel.counts(),
            booking_statuses: self.count_by_status.counts(),
            business_health,
            data_quality: DataQuality {
                malformed_amounts,
                undated_records: self.undated,
            },
        }
    }
}

/// Booking analytics service.
///
/// Stateless: every call recomputes from the records it is given.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Builds the dashboard aggregates for the bookings inside `range`.
    ///
    /// Blank categories group under `"Unknown"`. In lenient mode malformed
    /// amounts count as zero and are reported in `data_quality`. Empty input
    /// yields zeroed aggregates, not an error.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::MalformedAmount` in strict mode for the first
    /// amount that is neither blank nor a clean number.
    pub fn build_dashboard(
        bookings: &[BookingRecord],
        range: &DateRange,
        options: &AnalyticsOptions,
    ) -> Result<DashboardData, AnalyticsError> {
        let mut reader = AmountReader::new(options.parse_mode);
        let mut accumulator = Accumulator::default();

        for (index, booking) in bookings.iter().enumerate() {
            if !range.includes(booking) {
                continue;
            }
            let amounts = BookingAmounts::read(booking, index + 1, &mut reader)?;
            accumulator.add(booking, &amounts);
        }

        Ok(accumulator.finish(reader.malformed()))
    }
}
