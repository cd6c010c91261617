//! Session middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::AppState;
use bookgx_shared::{Claims, JwtError};

/// Name of the session cookie set at login.
pub const AUTH_COOKIE: &str = "dashboard_auth";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn session_token(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(request.headers())
            .get(AUTH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Session middleware.
///
/// Reads the token from the `Authorization: Bearer` header, or from the
/// `dashboard_auth` cookie when the header is absent, validates it, and stores
/// the claims in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(&request) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "missing_token",
                "message": "A session cookie or Bearer token is required"
            })),
        )
            .into_response();
    };

    match state.jwt_service.validate_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            let (error, message) = match e {
                JwtError::Expired => ("token_expired", "Session has expired"),
                _ => ("invalid_token", "Invalid or malformed token"),
            };

            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response()
        }
    }
}

/// Rejects sessions whose role is not Admin. Runs after `auth_middleware`.
pub async fn admin_middleware(request: Request, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<Claims>()
        .is_some_and(Claims::is_admin);

    if !is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "forbidden",
                "message": "Administrator role required"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

/// Extractor for the authenticated session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.user_name()
    }

    /// Returns the user's role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.0.role
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use axum::body::Body;

    fn request_with(header: Option<&str>, cookie: Option<&str>) -> Request {
        let mut builder = HttpRequest::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(value) = cookie {
            builder = builder.header("Cookie", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let request = request_with(Some("Bearer from-header"), Some("dashboard_auth=from-cookie"));
        assert_eq!(session_token(&request).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_cookie_is_used_without_header() {
        let request = request_with(None, Some("theme=dark; dashboard_auth=from-cookie"));
        assert_eq!(session_token(&request).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_empty_cookie_is_ignored() {
        let request = request_with(None, Some("dashboard_auth="));
        assert_eq!(session_token(&request), None);
    }
}
