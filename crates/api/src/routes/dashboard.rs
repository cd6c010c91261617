//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use bookgx_core::analytics::{
    AnalyticsOptions, AnalyticsService, DashboardData, DateRange, PeriodPreset,
};
use bookgx_shared::{Card, Claims};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// First day included, `YYYY-MM-DD`. Blank leaves the range open.
    pub start: Option<String>,
    /// Last day included, `YYYY-MM-DD`. Blank leaves the range open.
    pub end: Option<String>,
    /// Preset such as `this-month` or `last-90-days`; ignored when
    /// `start` or `end` is given.
    pub period: Option<String>,
}

impl DashboardQuery {
    fn range(&self) -> Result<DateRange, ApiError> {
        if self.start.is_some() || self.end.is_some() {
            let start = self.start.as_deref().unwrap_or_default();
            let end = self.end.as_deref().unwrap_or_default();
            return Ok(DateRange::from_strings(start, end)?);
        }

        Ok(match &self.period {
            Some(period) => PeriodPreset::parse(period).resolve(Utc::now().date_naive()),
            None => DateRange::all(),
        })
    }
}

/// Drops the sections the session's cards do not grant.
fn restrict_to_cards(mut data: DashboardData, claims: &Claims) -> DashboardData {
    if !claims.has_card(Card::StatsOverview) {
        data.stats = None;
    }
    if !claims.has_card(Card::RevenueChart) {
        data.revenue = None;
        data.users = None;
        data.conversion = None;
    }
    if !claims.has_card(Card::PerformanceIndicators) {
        data.performance = None;
    }
    data
}

/// GET /dashboard - Aggregate bookings for the requested range.
async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardData>, ApiError> {
    let range = query.range()?;
    let loaded = state.bookings.load().await;

    let options = AnalyticsOptions {
        parse_mode: state.parse_mode,
    };
    let data = AnalyticsService::build_dashboard(&loaded.bookings, &range, &options)?
        .with_source(loaded.source);

    debug!(
        user = %user.name(),
        records = data.record_count,
        source = ?data.data_source,
        "Built dashboard"
    );

    Ok(Json(restrict_to_cards(data, user.claims())))
}
