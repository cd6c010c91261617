//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Session middleware (bearer header or cookie) and the admin gate
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use bookgx_sheets::{BookingLoader, SheetsV4Client, UserLoader};
use bookgx_shared::{JwtService, ParseMode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Booking rows, live or sample.
    pub bookings: BookingLoader,
    /// User directory, sheet or configured.
    pub users: UserLoader,
    /// Sheets API client, present when credentials are configured.
    pub sheets_client: Option<Arc<SheetsV4Client>>,
    /// Tab used when `/sheets/headers` is called without a sheet.
    pub default_sheet: String,
    /// JWT service for session tokens.
    pub jwt_service: Arc<JwtService>,
    /// Amount parsing mode.
    pub parse_mode: ParseMode,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
