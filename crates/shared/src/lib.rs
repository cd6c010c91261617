//! Shared configuration, errors, and session types for BookGX.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Dashboard card permissions and session claims
//! - JWT session tokens

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::{Card, Claims, SessionUser};
pub use config::{AppConfig, ParseMode};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
