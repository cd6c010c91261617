//! Tabular sheet data.
//!
//! This module turns raw sheet content into records:
//! - Quote-aware CSV parsing
//! - Header-keyed records with tolerant column lookup
//! - The booking view over a record and its column names

pub mod booking;
pub mod csv;
pub mod table;

pub use booking::{BookingRecord, columns};
pub use csv::{parse_csv, parse_csv_line};
pub use table::{Record, SheetTable, normalize_header};
