//! Booking dates, date ranges, and period presets.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::AnalyticsError;
use crate::records::BookingRecord;

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a booking date cell.
///
/// Accepts ISO dates, slashed ISO, US `M/D/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY`,
/// `15 Jan 2024`, `Jan 15, 2024`, the same with a time component, and
/// RFC 3339 timestamps. Returns `None` for blank or unrecognised input.
#[must_use]
pub fn parse_booking_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|timestamp| timestamp.date())
        })
}

/// Inclusive date window with optional bounds.
///
/// A range with neither bound keeps every record, dated or not. Once any bound
/// is set, records without a readable date fall outside the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// The no-filter range.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Creates a range, rejecting a start after the end.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidDateRange` if `start > end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, AnalyticsError> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(AnalyticsError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from query strings; blank strings leave a bound open.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidDate` for unreadable bounds and
    /// `AnalyticsError::InvalidDateRange` if `start > end`.
    pub fn from_strings(start: &str, end: &str) -> Result<Self, AnalyticsError> {
        Self::new(parse_bound(start)?, parse_bound(end)?)
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns true if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Returns true if the booking belongs in the range.
    #[must_use]
    pub fn includes(&self, booking: &BookingRecord) -> bool {
        if self.is_unbounded() {
            return true;
        }
        parse_booking_date(booking.booking_date()).is_some_and(|date| self.contains(date))
    }

    /// Returns the bookings inside the range, in input order.
    #[must_use]
    pub fn filter<'a>(&self, bookings: &'a [BookingRecord]) -> Vec<&'a BookingRecord> {
        bookings.iter().filter(|booking| self.includes(booking)).collect()
    }
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, AnalyticsError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_booking_date(raw)
        .map(Some)
        .ok_or_else(|| AnalyticsError::InvalidDate(raw.to_string()))
}

/// Named reporting periods offered by the dashboard filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeriodPreset {
    /// Only the given day.
    Today,
    /// From the first of the month to the given day.
    ThisMonth,
    /// The whole previous calendar month.
    LastMonth,
    /// From January 1st to the given day.
    ThisYear,
    /// No filter.
    All,
    /// The 90 days up to the given day.
    #[default]
    Last90Days,
}

impl PeriodPreset {
    /// Parses a preset name; unknown names fall back to the last 90 days.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "today" => Self::Today,
            "this-month" => Self::ThisMonth,
            "last-month" => Self::LastMonth,
            "this-year" => Self::ThisYear,
            "all" => Self::All,
            _ => Self::Last90Days,
        }
    }

    /// Resolves the preset relative to `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let month_start = first_of_month(today);
        let (start, end) = match self {
            Self::Today => (today, today),
            Self::ThisMonth => (month_start, today),
            Self::LastMonth => {
                let last_month_end = month_start - Duration::days(1);
                (first_of_month(last_month_end), last_month_end)
            }
            Self::ThisYear => (today - Duration::days(i64::from(today.ordinal0())), today),
            Self::All => return DateRange::all(),
            Self::Last90Days => (today - Duration::days(90), today),
        };
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}
