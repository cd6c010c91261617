//! Core booking analytics for BookGX.
//!
//! This crate contains pure business logic with ZERO web or network dependencies.
//! Sheet rows come in as text; dashboard aggregates come out.
//!
//! # Modules
//!
//! - `records` - CSV parsing, header-keyed records, the booking view
//! - `analytics` - Amount cleaning, date filters, breakdowns, funnel, trends
//! - `users` - User directory and card permissions
//! - `sample` - Built-in sample bookings

pub mod analytics;
pub mod records;
pub mod sample;
pub mod users;
