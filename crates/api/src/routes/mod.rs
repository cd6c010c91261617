//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::auth::{admin_middleware, auth_middleware},
};

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod sheets;
pub mod users;

/// Creates the API router: public, session, and admin routes.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Admin routes: session plus the Admin role
    let admin_routes = Router::new()
        .merge(sheets::routes())
        .merge(users::routes())
        .layer(middleware::from_fn(admin_middleware));

    // Routes that require a session
    let protected_routes = Router::new()
        .merge(auth::session_routes())
        .merge(dashboard::routes())
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
