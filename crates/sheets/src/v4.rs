//! Google Sheets v4 REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bookgx_core::records::SheetTable;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::credentials::Credentials;
use crate::error::FetchError;
use crate::source::SheetSource;

const METADATA_FIELDS: &str = "spreadsheetId,properties.title,sheets.properties";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetResponse {
    spreadsheet_id: String,
    #[serde(default)]
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct SpreadsheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    index: i64,
    #[serde(default)]
    grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: i64,
    #[serde(default)]
    column_count: i64,
}

/// Spreadsheet metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetInfo {
    /// Spreadsheet ID.
    pub spreadsheet_id: String,
    /// Spreadsheet title.
    pub title: String,
    /// Tabs in display order.
    pub sheets: Vec<SheetInfo>,
}

/// One tab of a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    /// Tab gid.
    pub sheet_id: i64,
    /// Tab title.
    pub title: String,
    /// Position among the tabs.
    pub index: i64,
    /// Grid rows.
    pub row_count: i64,
    /// Grid columns.
    pub column_count: i64,
}

impl From<SpreadsheetResponse> for SpreadsheetInfo {
    fn from(response: SpreadsheetResponse) -> Self {
        Self {
            spreadsheet_id: response.spreadsheet_id,
            title: response.properties.title,
            sheets: response
                .sheets
                .into_iter()
                .map(|entry| SheetInfo {
                    sheet_id: entry.properties.sheet_id,
                    title: entry.properties.title,
                    index: entry.properties.index,
                    row_count: entry.properties.grid_properties.row_count,
                    column_count: entry.properties.grid_properties.column_count,
                })
                .collect(),
        }
    }
}

/// Outcome of a connection test.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionTest {
    /// Whether the spreadsheet could be read.
    pub success: bool,
    /// Human readable summary.
    pub message: String,
    /// Extra details on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Client for one spreadsheet through the Sheets v4 API.
#[derive(Debug, Clone)]
pub struct SheetsV4Client {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    credentials: Arc<Credentials>,
}

impl SheetsV4Client {
    /// Creates a client; the HTTP client is shared with the credentials.
    pub fn new(
        base_url: &str,
        spreadsheet_id: &str,
        credentials: &bookgx_shared::config::CredentialsConfig,
        timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let credentials = Arc::new(Credentials::from_config(credentials, &client));
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            credentials,
        })
    }

    /// Returns the spreadsheet ID.
    #[must_use]
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidResponse(format!("invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidResponse("API base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        tracing::debug!(%url, "calling Sheets API");
        let request = self.credentials.authorize(self.client.get(url).query(query)).await?;
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }

    /// Reads a range (`Sheet1`, `Sheet1!A1:Q`) as rows of strings.
    pub async fn values(&self, range: &str) -> Result<Vec<Vec<String>>, FetchError> {
        let url = self.url(&["values", range])?;
        let body: ValueRange = self.get_json(url, &[]).await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    /// Reads spreadsheet metadata and the list of tabs.
    pub async fn spreadsheet_info(&self) -> Result<SpreadsheetInfo, FetchError> {
        let url = self.url(&[])?;
        let body: SpreadsheetResponse = self.get_json(url, &[("fields", METADATA_FIELDS)]).await?;
        Ok(body.into())
    }

    /// Reads the header row of a tab.
    pub async fn sheet_headers(&self, sheet: &str) -> Result<Vec<String>, FetchError> {
        let rows = self.values(&format!("{sheet}!A1:1")).await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Checks that the spreadsheet can be read. Never fails; the outcome is in
    /// the result.
    pub async fn test_connection(&self) -> ConnectionTest {
        match self.spreadsheet_info().await {
            Ok(info) => ConnectionTest {
                success: true,
                message: format!("Connected to \"{}\"", info.title),
                details: Some(json!({
                    "spreadsheetId": info.spreadsheet_id,
                    "title": info.title,
                    "sheetCount": info.sheets.len(),
                    "sheets": info.sheets.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
                })),
            },
            Err(err) => {
                tracing::warn!(error = %err, spreadsheet_id = %self.spreadsheet_id, "Sheets connection test failed");
                ConnectionTest {
                    success: false,
                    message: err.to_string(),
                    details: None,
                }
            }
        }
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Reads one tab through the Sheets v4 API.
#[derive(Debug, Clone)]
pub struct SheetsV4Source {
    client: SheetsV4Client,
    sheet_name: String,
    range: Option<String>,
}

impl SheetsV4Source {
    /// Creates a source for `sheet_name`, optionally narrowed to an A1 range.
    #[must_use]
    pub fn new(client: SheetsV4Client, sheet_name: &str, range: Option<&str>) -> Self {
        Self {
            client,
            sheet_name: sheet_name.to_string(),
            range: range.map(str::to_string),
        }
    }

    /// Returns the A1 range requested from the API.
    #[must_use]
    pub fn a1_range(&self) -> String {
        match &self.range {
            Some(range) => format!("{}!{range}", self.sheet_name),
            None => self.sheet_name.clone(),
        }
    }
}

#[async_trait]
impl SheetSource for SheetsV4Source {
    fn describe(&self) -> String {
        format!("sheets-api:{}/{}", self.client.spreadsheet_id(), self.a1_range())
    }

    async fn fetch_rows(&self) -> Result<SheetTable, FetchError> {
        let rows = self.client.values(&self.a1_range()).await?;
        let table = SheetTable::from_rows(rows);
        tracing::debug!(rows = table.len(), range = %self.a1_range(), "read Sheets API values");
        Ok(table)
    }
}
