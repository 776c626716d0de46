//! Access tokens for Google REST APIs
//!
//! On Cloud Functions and Cloud Run the runtime service account token is
//! served by the metadata server. Tokens are cached until shortly before
//! they expire.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use redactor_core::{Config, GcpAuthMode};
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use tokio::sync::RwLock;

use crate::error::DlpError;

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: i64,
    #[allow(dead_code)]
    token_type: Option<String>,
}

/// Token held until shortly before the metadata server says it expires
#[derive(Clone)]
pub struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Source of the bearer token attached to outgoing API requests
pub enum TokenSource {
    /// No Authorization header (local emulators, tests)
    None,
    /// Fixed token, e.g. from `gcloud auth print-access-token`
    Static(String),
    /// Runtime service account token from the metadata server
    MetadataServer {
        http_client: reqwest::Client,
        token_url: String,
        cache: RwLock<Option<CachedToken>>,
    },
}

impl Debug for TokenSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenSource::None => write!(f, "TokenSource::None"),
            TokenSource::Static(_) => write!(f, "TokenSource::Static(..)"),
            TokenSource::MetadataServer { token_url, .. } => f
                .debug_struct("TokenSource::MetadataServer")
                .field("token_url", token_url)
                .finish(),
        }
    }
}

impl TokenSource {
    pub fn metadata_server(http_client: reqwest::Client, metadata_url: &str) -> Self {
        TokenSource::MetadataServer {
            http_client,
            token_url: format!("{}{}", metadata_url.trim_end_matches('/'), TOKEN_PATH),
            cache: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config, http_client: reqwest::Client) -> anyhow::Result<Self> {
        match config.auth_mode() {
            GcpAuthMode::None => Ok(TokenSource::None),
            GcpAuthMode::Static => config
                .access_token()
                .map(|token| TokenSource::Static(token.to_string()))
                .ok_or_else(|| {
                    anyhow::anyhow!("GOOGLE_OAUTH_ACCESS_TOKEN is required when GCP_AUTH_MODE=static")
                }),
            GcpAuthMode::Metadata => Ok(TokenSource::metadata_server(
                http_client,
                config.metadata_url(),
            )),
        }
    }

    /// Current token, or `None` when requests go out unauthenticated
    pub async fn token(&self) -> Result<Option<String>, DlpError> {
        match self {
            TokenSource::None => Ok(None),
            TokenSource::Static(token) => Ok(Some(token.clone())),
            TokenSource::MetadataServer {
                http_client,
                token_url,
                cache,
            } => {
                {
                    let cached = cache.read().await;
                    if let Some(entry) = cached.as_ref() {
                        if entry.expires_at > Utc::now() {
                            return Ok(Some(entry.token.clone()));
                        }
                    }
                }

                let mut cached = cache.write().await;
                // Another task may have refreshed while we waited for the lock
                if let Some(entry) = cached.as_ref() {
                    if entry.expires_at > Utc::now() {
                        return Ok(Some(entry.token.clone()));
                    }
                }

                let fresh = fetch_metadata_token(http_client, token_url).await?;
                let lifetime = (fresh.expires_in - EXPIRY_MARGIN_SECONDS).max(0);
                let expires_at = Utc::now() + ChronoDuration::seconds(lifetime);
                tracing::debug!(expires_at = %expires_at, "Fetched access token from metadata server");

                *cached = Some(CachedToken {
                    token: fresh.access_token.clone(),
                    expires_at,
                });
                Ok(Some(fresh.access_token))
            }
        }
    }

    /// Attach the bearer token to a request, if there is one
    pub async fn apply_auth(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, DlpError> {
        Ok(match self.token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }
}

async fn fetch_metadata_token(
    http_client: &reqwest::Client,
    token_url: &str,
) -> Result<MetadataToken, DlpError> {
    let response = http_client
        .get(token_url)
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .map_err(|e| DlpError::Auth(format!("Failed to reach metadata server: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(DlpError::Auth(format!(
            "Metadata server returned {}: {}",
            status, error_text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| DlpError::Auth(format!("Failed to parse metadata token: {}", e)))
}
