//! Analytics error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building dashboard aggregates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A date bound could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// An amount could not be cleaned in strict mode.
    #[error("Malformed amount {value:?} in column {column} at row {row}")]
    MalformedAmount {
        /// 1-based data row, not counting the header.
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell value.
        value: String,
    },
}
