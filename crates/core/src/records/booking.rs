//! Booking view over a sheet record.

use super::table::Record;

/// Booking sheet column names.
pub mod columns {
    /// Date the booking was made.
    pub const BOOKING_DATE: &str = "Booking Date";
    /// Branch or venue.
    pub const LOCATION: &str = "Location";
    /// Client display name.
    pub const CLIENT_NAME: &str = "Client Name";
    /// Lifecycle status label.
    pub const BOOKING_STATUS: &str = "Booking Status";
    /// Booked amount.
    pub const TOTAL_BOOK: &str = "Total Book";
    /// Amount paid so far.
    pub const TOTAL_PAID: &str = "Total Paid";
    /// Up-sell amount on top of the booking.
    pub const TOTAL_BOOK_PLUS: &str = "Total Book Plus";
    /// Rating left by the branch manager.
    pub const MANAGER_RATING: &str = "Manager Rating";
    /// Free text review from the client.
    pub const CLIENT_REVIEW: &str = "Client Review";
    /// Numeric client rating.
    pub const RATING: &str = "Rating";
    /// Acquisition channel.
    pub const ACQUISITION_CHANNEL: &str = "How did you know us ?";
    /// Nature of the booking.
    pub const NATURE_BOOKING: &str = "Nature Booking";
    /// Cash payments.
    pub const CASH: &str = "Cash";
    /// Mada card payments.
    pub const MADA: &str = "Mada";
    /// Tabby instalments.
    pub const TABBY: &str = "Tabby";
    /// Tamara instalments.
    pub const TAMARA: &str = "Tamara";
    /// Bank transfers.
    pub const BANK_TRANSFER: &str = "Bank Transfer";

    /// Every currency-like column, in the order they are cleaned.
    pub const AMOUNTS: [&str; 8] = [
        TOTAL_BOOK,
        TOTAL_PAID,
        TOTAL_BOOK_PLUS,
        CASH,
        MADA,
        TABBY,
        TAMARA,
        BANK_TRANSFER,
    ];
}

/// A sheet record read through the booking columns.
///
/// Every accessor returns the trimmed raw string; cleaning and typing happen
/// in the aggregator.
#[derive(Debug, Clone)]
pub struct BookingRecord(Record);

impl BookingRecord {
    /// Builds a booking from `(column, value)` pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self(Record::from_pairs(pairs))
    }

    /// Returns the value under any column.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column)
    }

    /// Raw booking date.
    #[must_use]
    pub fn booking_date(&self) -> &str {
        self.get(columns::BOOKING_DATE)
    }

    /// Location label.
    #[must_use]
    pub fn location(&self) -> &str {
        self.get(columns::LOCATION)
    }

    /// Client name.
    #[must_use]
    pub fn client_name(&self) -> &str {
        self.get(columns::CLIENT_NAME)
    }

    /// Booking status label.
    #[must_use]
    pub fn status(&self) -> &str {
        self.get(columns::BOOKING_STATUS)
    }

    /// Acquisition channel label.
    #[must_use]
    pub fn acquisition_channel(&self) -> &str {
        self.get(columns::ACQUISITION_CHANNEL)
    }

    /// Nature of booking label.
    #[must_use]
    pub fn nature(&self) -> &str {
        self.get(columns::NATURE_BOOKING)
    }

    /// Returns true if the branch manager rated the booking.
    #[must_use]
    pub fn has_manager_rating(&self) -> bool {
        self.0.has(columns::MANAGER_RATING)
    }

    /// Returns true if any review field is filled.
    #[must_use]
    pub fn has_review(&self) -> bool {
        self.has_manager_rating()
            || self.0.has(columns::CLIENT_REVIEW)
            || self.0.has(columns::RATING)
    }

    /// Returns the underlying record.
    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.0
    }
}

impl From<Record> for BookingRecord {
    fn from(record: Record) -> Self {
        Self(record)
    }
}
