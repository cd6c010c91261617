//! Sheets API credentials.
//!
//! API keys and OAuth tokens are attached as-is. Service accounts sign an
//! RS256 assertion, exchange it at the token endpoint, and reuse the access
//! token until one minute before it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use bookgx_shared::config::CredentialsConfig;

use crate::error::FetchError;

/// Read-only Sheets scope requested for service account tokens.
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: DateTime<Utc>,
}

/// A Google service account exchanging signed assertions for access tokens.
pub struct ServiceAccount {
    client_email: String,
    private_key: String,
    token_uri: String,
    client: Client,
    cache: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"[hidden]")
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccount {
    /// Creates a service account. Escaped `\n` sequences in the key, common
    /// when the key comes from an environment variable, are unescaped.
    #[must_use]
    pub fn new(client_email: &str, private_key: &str, token_uri: &str, client: Client) -> Self {
        Self {
            client_email: client_email.to_string(),
            private_key: private_key.replace("\\n", "\n"),
            token_uri: token_uri.to_string(),
            client,
            cache: Mutex::new(None),
        }
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, FetchError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| FetchError::Signing(e.to_string()))?;
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SHEETS_READONLY_SCOPE,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| FetchError::Signing(e.to_string()))
    }

    /// Returns a valid access token, refreshing it when close to expiry.
    pub async fn access_token(&self) -> Result<String, FetchError> {
        let mut cache = self.cache.lock().await;
        let now = Utc::now();
        if let Some(token) = cache.as_ref()
            && now < token.refresh_at
        {
            return Ok(token.access_token.clone());
        }

        let assertion = self.assertion(now)?;
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http { status, body });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            client_email = %self.client_email,
            expires_in = token.expires_in,
            "obtained service account access token"
        );
        *cache = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: now + Duration::seconds(token.expires_in - REFRESH_MARGIN_SECS),
        });
        Ok(token.access_token)
    }
}

/// Credentials attached to Sheets API requests.
#[derive(Debug)]
pub enum Credentials {
    /// API key sent as the `key` query parameter.
    ApiKey(String),
    /// OAuth access token sent as a bearer token.
    Bearer(String),
    /// Service account tokens.
    ServiceAccount(ServiceAccount),
}

impl Credentials {
    /// Builds credentials from configuration; service accounts share `client`.
    #[must_use]
    pub fn from_config(config: &CredentialsConfig, client: &Client) -> Self {
        match config {
            CredentialsConfig::ApiKey { api_key } => Self::ApiKey(api_key.clone()),
            CredentialsConfig::Oauth { access_token } => Self::Bearer(access_token.clone()),
            CredentialsConfig::ServiceAccount {
                client_email,
                private_key,
                token_uri,
            } => Self::ServiceAccount(ServiceAccount::new(
                client_email,
                private_key,
                token_uri,
                client.clone(),
            )),
        }
    }

    /// Attaches the credentials to a request.
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, FetchError> {
        Ok(match self {
            Self::ApiKey(key) => request.query(&[("key", key)]),
            Self::Bearer(token) => request.bearer_auth(token),
            Self::ServiceAccount(account) => request.bearer_auth(account.access_token().await?),
        })
    }
}
