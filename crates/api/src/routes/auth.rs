//! Authentication routes for login, logout, and the current session.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use bookgx_shared::auth::{LoginRequest, LoginResponse};
use serde_json::json;
use tracing::{error, info};

use crate::{
    AppState,
    middleware::{AUTH_COOKIE, AuthUser},
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Creates auth routes that need a session.
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

fn session_cookie(token: String, max_age_secs: i64) -> String {
    let cookie = Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build();
    format!("{cookie}; Max-Age={max_age_secs}")
}

/// POST /auth/login - Check credentials against the users directory and open a session.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let directory = state.users.load().await;

    let Some(user) = directory.authenticate(&payload.name, &payload.password) else {
        info!(name = %payload.name, "Failed login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_credentials",
                "message": "Invalid name or password"
            })),
        )
            .into_response();
    };

    let session_user = user.session_user();
    let access_token = match state.jwt_service.generate_session_token(&session_user) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate session token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    let expires_in = state.jwt_service.session_expires_in();
    info!(name = %session_user.name, role = %session_user.role, "User logged in");

    (
        StatusCode::OK,
        [(SET_COOKIE, session_cookie(access_token.clone(), expires_in))],
        Json(LoginResponse {
            user: session_user,
            access_token,
            expires_in,
        }),
    )
        .into_response()
}

/// POST /auth/logout - Clear the session cookie.
async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(SET_COOKIE, session_cookie(String::new(), 0))],
        Json(json!({ "message": "Logged out" })),
    )
}

/// GET /auth/me - Return the user behind the current session.
async fn me(user: AuthUser) -> impl IntoResponse {
    Json(user.claims().to_user())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::SET_COOKIE};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::create_router;
    use crate::test_support::{body_json, get, state, token_for};
    use bookgx_shared::Card;

    fn login_request(name: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "name": name, "password": password }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn login_returns_session_and_cookie() {
        let response = create_router(state())
            .oneshot(login_request("rana", "rana-pass"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("dashboard_auth="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));

        let body = body_json(response).await;
        assert_eq!(body["user"]["name"], "Rana");
        assert_eq!(body["user"]["role"], "Sales Officer");
        assert_eq!(
            body["user"]["cards"],
            json!(["ConnectionStatus", "StatsOverview", "RevenueChart"])
        );
        assert_eq!(body["expires_in"], 86_400);
        assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let response = create_router(state())
            .oneshot(login_request("Rana", "wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(SET_COOKIE).is_none());
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid_credentials");
    }

    #[tokio::test]
    async fn login_rejects_blank_password() {
        let response = create_router(state())
            .oneshot(login_request("Rana", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn session_cookie_from_login_opens_me() {
        let app = create_router(state());
        let login = app
            .clone()
            .oneshot(login_request("Omar", "omar-pass"))
            .await
            .unwrap();
        let set_cookie = login.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        let pair = set_cookie.split(';').next().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/auth/me")
                    .header("Cookie", pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Omar");
        assert_eq!(body["cards"], json!(["StatsOverview"]));
    }

    #[tokio::test]
    async fn me_returns_bearer_session_user() {
        let state = state();
        let token = token_for(&state, "Lama", "Artist Manager", &[Card::RevenueChart]);

        let response = create_router(state)
            .oneshot(get("/api/v1/auth/me", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Lama");
        assert_eq!(body["role"], "Artist Manager");
    }

    #[tokio::test]
    async fn me_requires_session() {
        let response = create_router(state())
            .oneshot(get("/api/v1/auth/me", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "missing_token");
    }

    #[tokio::test]
    async fn logout_expires_cookie() {
        let response = create_router(state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("dashboard_auth=;"));
        assert!(cookie.ends_with("Max-Age=0"));
    }
}
