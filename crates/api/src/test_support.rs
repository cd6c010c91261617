//! Shared fixtures for route tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use bookgx_core::records::SheetTable;
use bookgx_core::users::UserDirectory;
use bookgx_sheets::{BookingLoader, FetchError, SheetSource, UserLoader};
use bookgx_shared::config::UserEntry;
use bookgx_shared::{Card, JwtConfig, JwtService, ParseMode, SessionUser};
use http_body_util::BodyExt;

use crate::AppState;

pub const BOOKINGS_CSV: &str = "Booking Date,Location,Client Name,Booking Status,Total Book,Total Paid\n\
    2024-01-10,Riyadh,Rana,Completed,\"1,000\",1000\n\
    2024-01-20,Jeddah,Omar,Confirmed,500,250\n\
    2024-02-05,Riyadh,Lama,Canceled,200,\n";

pub struct StaticSource(pub &'static str);

#[async_trait]
impl SheetSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch_rows(&self) -> Result<SheetTable, FetchError> {
        Ok(SheetTable::from_csv(self.0))
    }
}

pub struct UnreachableSource;

#[async_trait]
impl SheetSource for UnreachableSource {
    fn describe(&self) -> String {
        "unreachable".to_string()
    }

    async fn fetch_rows(&self) -> Result<SheetTable, FetchError> {
        Err(FetchError::InvalidResponse("sheet offline".to_string()))
    }
}

fn entry(name: &str, role: &str, password: &str, cards: Option<&str>) -> UserEntry {
    UserEntry {
        name: name.to_string(),
        role: role.to_string(),
        password: password.to_string(),
        cards: cards.map(str::to_string),
    }
}

pub fn users() -> UserDirectory {
    UserDirectory::from_entries(&[
        entry("Adeel", "Admin", "admin-pass", None),
        entry("Rana", "Sales Officer", "rana-pass", None),
        entry("Omar", "Receptionist", "omar-pass", Some("StatsOverview")),
    ])
}

pub fn state_with(bookings: Arc<dyn SheetSource>, parse_mode: ParseMode) -> AppState {
    AppState {
        bookings: BookingLoader::new(bookings),
        users: UserLoader::new(None, users()),
        sheets_client: None,
        default_sheet: "Sheet1".to_string(),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        parse_mode,
    }
}

pub fn state() -> AppState {
    state_with(Arc::new(StaticSource(BOOKINGS_CSV)), ParseMode::Lenient)
}

pub fn token_for(state: &AppState, name: &str, role: &str, cards: &[Card]) -> String {
    state
        .jwt_service
        .generate_session_token(&SessionUser {
            name: name.to_string(),
            role: role.to_string(),
            cards: cards.to_vec(),
        })
        .unwrap()
}

pub fn admin_token(state: &AppState) -> String {
    token_for(state, "Adeel", "Admin", &Card::ALL)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
