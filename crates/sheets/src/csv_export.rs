//! Public CSV export of a sheet tab.

use std::time::Duration;

use async_trait::async_trait;
use bookgx_core::records::SheetTable;
use reqwest::Client;

use crate::error::FetchError;
use crate::source::SheetSource;

/// Reads one tab through `/spreadsheets/d/{id}/export?format=csv`.
///
/// Works for sheets shared as "anyone with the link"; private sheets answer
/// with a sign-in page, reported as an invalid response.
#[derive(Debug, Clone)]
pub struct CsvExportSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    gid: Option<String>,
}

impl CsvExportSource {
    /// Creates a source for the given spreadsheet and optional tab gid.
    pub fn new(
        base_url: &str,
        spreadsheet_id: &str,
        gid: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            gid: gid.map(str::to_string),
        })
    }

    /// Returns the export URL.
    #[must_use]
    pub fn export_url(&self) -> String {
        let mut url = format!(
            "{}/spreadsheets/d/{}/export?format=csv",
            self.base_url, self.spreadsheet_id
        );
        if let Some(gid) = &self.gid {
            url.push_str("&gid=");
            url.push_str(gid);
        }
        url
    }
}

#[async_trait]
impl SheetSource for CsvExportSource {
    fn describe(&self) -> String {
        self.export_url()
    }

    async fn fetch_rows(&self) -> Result<SheetTable, FetchError> {
        let url = self.export_url();
        tracing::debug!(%url, "fetching sheet CSV export");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http { status, body });
        }

        let body = response.text().await?;
        let head: String = body
            .trim_start()
            .chars()
            .take(15)
            .collect::<String>()
            .to_ascii_lowercase();
        if head.starts_with("<!doctype html") || head.starts_with("<html") {
            return Err(FetchError::InvalidResponse(
                "received HTML instead of CSV; is the sheet shared publicly?".to_string(),
            ));
        }

        let table = SheetTable::from_csv(&body);
        tracing::debug!(rows = table.len(), "parsed sheet CSV export");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CSV: &str = "Booking Date,Location,Total Book\n2024-01-05,Riyadh,\"1,200\"\n2024-01-06,Jeddah,800\n";

    #[test]
    fn export_url_with_and_without_gid() {
        let with_gid =
            CsvExportSource::new("https://docs.google.com/", "abc", Some("42"), 5).unwrap();
        let without_gid = CsvExportSource::new("https://docs.google.com", "abc", None, 5).unwrap();

        assert_eq!(
            with_gid.export_url(),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=42"
        );
        assert_eq!(
            without_gid.export_url(),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv"
        );
    }

    #[tokio::test]
    async fn fetches_and_parses_csv() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spreadsheets/d/sheet-123/export"))
            .and(query_param("format", "csv"))
            .and(query_param("gid", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CSV))
            .mount(&server)
            .await;

        let source = CsvExportSource::new(&server.uri(), "sheet-123", Some("0"), 5).unwrap();
        let table = source.fetch_rows().await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].get("Total Book"), "1,200");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spreadsheets/d/missing/export"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let source = CsvExportSource::new(&server.uri(), "missing", None, 5).unwrap();
        let err = source.fetch_rows().await.unwrap_err();

        match err {
            FetchError::Http { status, body } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(body, "not found");
            }
            other => panic!("expected Http error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_in_page_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spreadsheets/d/private/export"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html>Sign in</html>"),
            )
            .mount(&server)
            .await;

        let source = CsvExportSource::new(&server.uri(), "private", None, 5).unwrap();
        let err = source.fetch_rows().await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidResponse(_)));
    }
}
