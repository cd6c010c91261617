//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Booking sheet configuration.
    pub sheets: SheetsConfig,
    /// User directory configuration.
    #[serde(default)]
    pub users: UsersConfig,
    /// Session token configuration.
    pub jwt: SessionConfig,
    /// Aggregation options.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// How booking rows are read from Google.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetsMode {
    /// Public CSV export of one tab.
    #[default]
    Csv,
    /// Sheets v4 REST API.
    Api,
}

/// Booking sheet configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Fetch mode.
    #[serde(default)]
    pub mode: SheetsMode,
    /// Spreadsheet ID (the part of the URL between `/d/` and `/edit`).
    pub spreadsheet_id: String,
    /// Tab gid for CSV export.
    #[serde(default)]
    pub gid: Option<String>,
    /// Tab title for the Sheets API.
    #[serde(default)]
    pub sheet_name: Option<String>,
    /// Optional A1 range within the tab for the Sheets API.
    #[serde(default)]
    pub range: Option<String>,
    /// Base URL of the CSV export host.
    #[serde(default = "default_csv_base_url")]
    pub csv_base_url: String,
    /// Base URL of the Sheets v4 API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Credentials for the Sheets API.
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

fn default_csv_base_url() -> String {
    "https://docs.google.com".to_string()
}

fn default_api_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Sheets API credentials.
#[derive(Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsConfig {
    /// API key passed as the `key` query parameter.
    ApiKey {
        /// The API key.
        api_key: String,
    },
    /// OAuth access token sent as a bearer token.
    Oauth {
        /// The access token.
        access_token: String,
    },
    /// Service account exchanging a signed assertion for access tokens.
    ServiceAccount {
        /// Service account e-mail.
        client_email: String,
        /// PEM encoded RSA private key.
        private_key: String,
        /// OAuth token endpoint.
        #[serde(default = "default_token_uri")]
        token_uri: String,
    },
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey { .. } => f.debug_struct("ApiKey").field("api_key", &"[hidden]").finish(),
            Self::Oauth { .. } => f
                .debug_struct("Oauth")
                .field("access_token", &"[hidden]")
                .finish(),
            Self::ServiceAccount {
                client_email,
                token_uri,
                ..
            } => f
                .debug_struct("ServiceAccount")
                .field("client_email", client_email)
                .field("private_key", &"[hidden]")
                .field("token_uri", token_uri)
                .finish(),
        }
    }
}

/// User directory configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersConfig {
    /// Spreadsheet holding the users tab.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    /// Tab gid of the users tab.
    #[serde(default)]
    pub gid: Option<String>,
    /// Users accepted when the users sheet is missing or unreachable.
    #[serde(default)]
    pub fallback: Vec<UserEntry>,
}

/// A statically configured dashboard user.
#[derive(Clone, Deserialize)]
pub struct UserEntry {
    /// Display name used to log in.
    pub name: String,
    /// Role label.
    pub role: String,
    /// Plain password.
    pub password: String,
    /// Comma separated card list; role defaults apply when absent.
    #[serde(default)]
    pub cards: Option<String>,
}

impl std::fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserEntry")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password", &"[hidden]")
            .field("cards", &self.cards)
            .finish()
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session lifetime in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

fn default_session_ttl_hours() -> i64 {
    24
}

/// How malformed amounts are handled during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Malformed amounts count as zero and are reported in the data quality counters.
    #[default]
    Lenient,
    /// The first malformed amount rejects the whole dataset.
    Strict,
}

/// Aggregation options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsConfig {
    /// Amount parsing mode.
    #[serde(default)]
    pub parse_mode: ParseMode,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BOOKGX").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
