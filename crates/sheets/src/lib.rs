//! Google Sheets access for BookGX.
//!
//! This crate reads booking and user rows from Google Sheets:
//! - `csv_export` - Public CSV export of one tab
//! - `v4` - Sheets v4 REST API: values, metadata, headers, connection test
//! - `credentials` - API key, OAuth token, or service account
//! - `loader` - Loaders that fall back to sample data or configured users

pub mod credentials;
pub mod csv_export;
pub mod error;
pub mod loader;
pub mod source;
pub mod v4;

use std::sync::Arc;

use bookgx_shared::config::{SheetsConfig, SheetsMode, UsersConfig};

pub use csv_export::CsvExportSource;
pub use error::FetchError;
pub use loader::{BookingLoader, LoadedBookings, UserLoader};
pub use source::SheetSource;
pub use v4::{ConnectionTest, SheetInfo, SheetsV4Client, SheetsV4Source, SpreadsheetInfo};

/// Tab read in API mode when no sheet name is configured.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Builds the booking source for the configured mode.
///
/// # Errors
///
/// Returns `FetchError::MissingCredentials` in API mode without credentials,
/// or a request error if the HTTP client cannot be built.
pub fn booking_source(config: &SheetsConfig) -> Result<Arc<dyn SheetSource>, FetchError> {
    match config.mode {
        SheetsMode::Csv => Ok(Arc::new(CsvExportSource::new(
            &config.csv_base_url,
            &config.spreadsheet_id,
            config.gid.as_deref(),
            config.timeout_secs,
        )?)),
        SheetsMode::Api => {
            let client = sheets_client(config)?.ok_or_else(|| {
                FetchError::MissingCredentials("sheets.credentials is required in api mode".to_string())
            })?;
            Ok(Arc::new(SheetsV4Source::new(
                client,
                config.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME),
                config.range.as_deref(),
            )))
        }
    }
}

/// Builds the Sheets API client when credentials are configured.
pub fn sheets_client(config: &SheetsConfig) -> Result<Option<SheetsV4Client>, FetchError> {
    config
        .credentials
        .as_ref()
        .map(|credentials| {
            SheetsV4Client::new(
                &config.api_base_url,
                &config.spreadsheet_id,
                credentials,
                config.timeout_secs,
            )
        })
        .transpose()
}

/// Builds the users sheet source when a users spreadsheet is configured.
///
/// The users tab is always read through the CSV export.
pub fn users_source(
    users: &UsersConfig,
    sheets: &SheetsConfig,
) -> Result<Option<Arc<dyn SheetSource>>, FetchError> {
    let Some(spreadsheet_id) = users.spreadsheet_id.as_deref() else {
        return Ok(None);
    };
    let source = CsvExportSource::new(
        &sheets.csv_base_url,
        spreadsheet_id,
        users.gid.as_deref(),
        sheets.timeout_secs,
    )?;
    let source: Arc<dyn SheetSource> = Arc::new(source);
    Ok(Some(source))
}
