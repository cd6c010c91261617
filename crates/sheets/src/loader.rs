//! Loaders that never fail: live sheet data or a fallback.

use std::sync::Arc;

use bookgx_core::analytics::DataSource;
use bookgx_core::records::BookingRecord;
use bookgx_core::sample::sample_bookings;
use bookgx_core::users::UserDirectory;

use crate::source::SheetSource;
use crate::v4::ConnectionTest;

/// Bookings ready for aggregation, tagged with where they came from.
#[derive(Debug, Clone)]
pub struct LoadedBookings {
    /// Booking records.
    pub bookings: Vec<BookingRecord>,
    /// Live sheet or sample data.
    pub source: DataSource,
}

/// Loads bookings from a sheet, falling back to the sample dataset.
#[derive(Clone)]
pub struct BookingLoader {
    source: Arc<dyn SheetSource>,
}

impl BookingLoader {
    /// Creates a loader over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn SheetSource>) -> Self {
        Self { source }
    }

    /// Describes the underlying source.
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Reads the source once and reports the outcome instead of falling back.
    pub async fn test_connection(&self) -> ConnectionTest {
        match self.source.fetch_rows().await {
            Ok(table) => ConnectionTest {
                success: true,
                message: format!("Read {} rows from {}", table.len(), self.source.describe()),
                details: Some(serde_json::json!({
                    "rows": table.len(),
                    "headers": table.headers(),
                })),
            },
            Err(err) => ConnectionTest {
                success: false,
                message: err.to_string(),
                details: None,
            },
        }
    }

    /// Fetches bookings. Any fetch error is logged and answered with the
    /// sample dataset; there is no retry.
    pub async fn load(&self) -> LoadedBookings {
        match self.source.fetch_rows().await {
            Ok(table) => {
                tracing::info!(
                    source = %self.source.describe(),
                    rows = table.len(),
                    "loaded bookings from sheet"
                );
                LoadedBookings {
                    bookings: table.into_records().into_iter().map(BookingRecord::from).collect(),
                    source: DataSource::GoogleSheets,
                }
            }
            Err(err) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    error = %err,
                    "sheet fetch failed, serving sample data"
                );
                LoadedBookings {
                    bookings: sample_bookings(),
                    source: DataSource::MockData,
                }
            }
        }
    }
}

/// Loads the user directory from a sheet, falling back to configured users.
#[derive(Clone)]
pub struct UserLoader {
    source: Option<Arc<dyn SheetSource>>,
    fallback: UserDirectory,
}

impl UserLoader {
    /// Creates a loader; without a source the fallback is always used.
    #[must_use]
    pub fn new(source: Option<Arc<dyn SheetSource>>, fallback: UserDirectory) -> Self {
        Self { source, fallback }
    }

    /// Fetches the directory. A missing, unreachable, or empty users sheet
    /// yields the configured users.
    pub async fn load(&self) -> UserDirectory {
        let Some(source) = &self.source else {
            return self.fallback.clone();
        };

        match source.fetch_rows().await {
            Ok(table) => {
                let directory = UserDirectory::from_table(&table);
                if directory.is_empty() {
                    tracing::warn!(source = %source.describe(), "users sheet has no users, using configured users");
                    return self.fallback.clone();
                }
                tracing::debug!(users = directory.len(), "loaded users from sheet");
                directory
            }
            Err(err) => {
                tracing::warn!(
                    source = %source.describe(),
                    error = %err,
                    "users sheet fetch failed, using configured users"
                );
                self.fallback.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookgx_core::records::SheetTable;
    use bookgx_shared::config::UserEntry;
    use reqwest::StatusCode;

    use crate::error::FetchError;

    struct StaticSource(&'static str);

    #[async_trait]
    impl SheetSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch_rows(&self) -> Result<SheetTable, FetchError> {
            Ok(SheetTable::from_csv(self.0))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SheetSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        async fn fetch_rows(&self) -> Result<SheetTable, FetchError> {
            Err(FetchError::Http {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "down".to_string(),
            })
        }
    }

    fn fallback() -> UserDirectory {
        UserDirectory::from_entries(&[UserEntry {
            name: "Fallback".to_string(),
            role: "Admin".to_string(),
            password: "fb".to_string(),
            cards: None,
        }])
    }

    #[tokio::test]
    async fn live_bookings_are_tagged_google_sheets() {
        let loader = BookingLoader::new(Arc::new(StaticSource("Location,Total Book\nRiyadh,100\n")));
        let loaded = loader.load().await;

        assert_eq!(loaded.source, DataSource::GoogleSheets);
        assert_eq!(loaded.bookings.len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_sample() {
        let loaded = BookingLoader::new(Arc::new(FailingSource)).load().await;

        assert_eq!(loaded.source, DataSource::MockData);
        assert_eq!(loaded.bookings.len(), sample_bookings().len());
    }

    #[tokio::test]
    async fn connection_test_reports_without_fallback() {
        let ok = BookingLoader::new(Arc::new(StaticSource("Location\nRiyadh\n")))
            .test_connection()
            .await;
        let failed = BookingLoader::new(Arc::new(FailingSource)).test_connection().await;

        assert!(ok.success);
        assert_eq!(ok.details.unwrap()["rows"], 1);
        assert!(!failed.success);
        assert!(failed.message.contains("503"));
    }

    #[tokio::test]
    async fn users_come_from_sheet() {
        let loader = UserLoader::new(
            Some(Arc::new(StaticSource("Name,Role,Password\nRana,Sales Officer,pw\n"))),
            fallback(),
        );
        let directory = loader.load().await;

        assert!(directory.authenticate("rana", "pw").is_some());
        assert!(directory.authenticate("Fallback", "fb").is_none());
    }

    #[tokio::test]
    async fn users_fall_back_when_sheet_fails_or_is_empty() {
        let failing = UserLoader::new(Some(Arc::new(FailingSource)), fallback());
        let empty = UserLoader::new(Some(Arc::new(StaticSource("Name,Role,Password\n"))), fallback());
        let unconfigured = UserLoader::new(None, fallback());

        for loader in [failing, empty, unconfigured] {
            assert!(loader.load().await.authenticate("fallback", "fb").is_some());
        }
    }
}
