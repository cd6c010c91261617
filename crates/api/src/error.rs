//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookgx_core::analytics::AnalyticsError;
use bookgx_sheets::FetchError;
use bookgx_shared::AppError;
use serde_json::json;

/// An `AppError` rendered as `{error, message}` with its HTTP status.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.0.error_code().to_ascii_lowercase(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        let app = match err {
            AnalyticsError::InvalidDate(_) | AnalyticsError::InvalidDateRange { .. } => {
                AppError::Validation(err.to_string())
            }
            AnalyticsError::MalformedAmount { .. } => AppError::DataQuality(err.to_string()),
        };
        Self(app)
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn renders_status_and_code() {
        let response = ApiError(AppError::Forbidden("admins only".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["error"], "forbidden");
        assert_eq!(body["message"], "Access denied: admins only");
    }

    #[test]
    fn analytics_errors_map_to_status() {
        let range = ApiError::from(AnalyticsError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        let malformed = ApiError::from(AnalyticsError::MalformedAmount {
            row: 3,
            column: "Total Book".to_string(),
            value: "abc".to_string(),
        });

        assert_eq!(range.0.status_code(), 400);
        assert_eq!(malformed.0.status_code(), 422);
    }

    #[test]
    fn fetch_errors_map_to_bad_gateway() {
        let err = ApiError::from(FetchError::InvalidResponse("html".to_string()));
        assert_eq!(err.0.status_code(), 502);

        let missing = ApiError::from(FetchError::MissingCredentials("none".to_string()));
        assert_eq!(missing.0.status_code(), 400);
    }
}
