//! Sheet administration routes (Admin role).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use bookgx_sheets::{ConnectionTest, SheetsV4Client, SpreadsheetInfo};
use bookgx_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the sheet administration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sheets/info", get(get_info))
        .route("/sheets/headers", get(get_headers))
        .route("/sheets/test", post(test_connection))
}

/// Query parameters for `/sheets/headers`.
#[derive(Debug, Deserialize)]
pub struct HeadersQuery {
    /// Tab name; defaults to the configured booking tab.
    pub sheet: Option<String>,
}

/// Header row of one tab.
#[derive(Debug, Serialize)]
pub struct HeadersResponse {
    /// Tab name.
    pub sheet: String,
    /// Header cells in column order.
    pub headers: Vec<String>,
}

fn require_client(state: &AppState) -> Result<&Arc<SheetsV4Client>, ApiError> {
    state.sheets_client.as_ref().ok_or_else(|| {
        ApiError(AppError::NotSupported(
            "Sheets API credentials are not configured".to_string(),
        ))
    })
}

/// GET /sheets/info - Spreadsheet title and tabs.
async fn get_info(State(state): State<AppState>) -> Result<Json<SpreadsheetInfo>, ApiError> {
    let client = require_client(&state)?;
    Ok(Json(client.spreadsheet_info().await?))
}

/// GET /sheets/headers - Header row of a tab.
async fn get_headers(
    State(state): State<AppState>,
    Query(query): Query<HeadersQuery>,
) -> Result<Json<HeadersResponse>, ApiError> {
    let client = require_client(&state)?;
    let sheet = query
        .sheet
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| state.default_sheet.clone());

    let headers = client.sheet_headers(&sheet).await?;
    Ok(Json(HeadersResponse { sheet, headers }))
}

/// POST /sheets/test - Try the configured booking source.
async fn test_connection(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<ConnectionTest> {
    let result = match &state.sheets_client {
        Some(client) => client.test_connection().await,
        None => state.bookings.test_connection().await,
    };

    info!(
        user = %user.name(),
        source = %state.bookings.describe(),
        success = result.success,
        "Sheet connection test"
    );

    Json(result)
}
