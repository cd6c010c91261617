//! BookGX Plus API Server
//!
//! Main entry point for the booking analytics backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookgx_api::{AppState, create_router};
use bookgx_core::users::UserDirectory;
use bookgx_sheets::{
    BookingLoader, DEFAULT_SHEET_NAME, UserLoader, booking_source, sheets_client, users_source,
};
use bookgx_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookgx=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Booking source and optional Sheets API client
    let bookings = BookingLoader::new(booking_source(&config.sheets)?);
    let sheets_client = sheets_client(&config.sheets)?.map(Arc::new);
    info!(
        source = %bookings.describe(),
        sheets_api = sheets_client.is_some(),
        "Booking source configured"
    );

    // Users directory, with the configured users as fallback
    let fallback = UserDirectory::from_entries(&config.users.fallback);
    let users_sheet = users_source(&config.users, &config.sheets)?;
    if users_sheet.is_none() && fallback.is_empty() {
        warn!("No users sheet and no configured users: nobody can log in");
    }
    let users = UserLoader::new(users_sheet, fallback);

    if config.jwt.secret == JwtConfig::default().secret {
        warn!("Using the default session secret; set BOOKGX__JWT__SECRET");
    }
    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    // Create application state
    let state = AppState {
        bookings,
        users,
        sheets_client,
        default_sheet: config
            .sheets
            .sheet_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
        jwt_service: Arc::new(jwt_service),
        parse_mode: config.analytics.parse_mode,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
