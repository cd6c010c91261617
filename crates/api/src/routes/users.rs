//! Users directory route (Admin role).

use axum::{Json, Router, extract::State, routing::get};
use bookgx_core::users::DirectoryUser;
use serde::Serialize;

use crate::AppState;

/// Creates the users routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// Users list response. Passwords are never serialized.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    /// Users in sheet order.
    pub users: Vec<DirectoryUser>,
    /// Number of users.
    pub count: usize,
}

/// GET /users - List the users directory.
async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    let directory = state.users.load().await;
    let users = directory.users().to_vec();
    Json(UsersResponse {
        count: users.len(),
        users,
    })
}
