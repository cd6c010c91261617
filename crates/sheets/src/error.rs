//! Sheet fetching errors.

use bookgx_shared::AppError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while reading a sheet.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The sheet host answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status.
        status: StatusCode,
        /// Response body.
        body: String,
    },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The Sheets API was selected without usable credentials.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// The service account assertion could not be signed.
    #[error("credential signing failed: {0}")]
    Signing(String),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::MissingCredentials(_) => Self::NotSupported(err.to_string()),
            _ => Self::ExternalService(err.to_string()),
        }
    }
}
