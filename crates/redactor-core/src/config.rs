//! Configuration module
//!
//! This module provides the configuration of the redaction function: the target
//! project, the raw and redacted buckets, the results dataset, the Google API
//! endpoints and the HTTP server settings.
//!
//! Values come from the process environment (a `.env` file is loaded first when
//! present). Every bucket/dataset/log value has a default so a deployment only has
//! to provide the project.

use std::env;
use std::str::FromStr;

use crate::auth_mode::GcpAuthMode;
use crate::constants::{
    DEFAULT_BQ_DATASET_ID, DEFAULT_DLP_API_URL, DEFAULT_LOGGING_API_URL, DEFAULT_LOG_NAME,
    DEFAULT_METADATA_URL, DEFAULT_RAW_BUCKET, DEFAULT_REDACTED_BUCKET,
};

const DEFAULT_PORT: u16 = 8080;
const HTTP_TIMEOUT_SECS: u64 = 60;

/// Console output format for tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Server-level settings independent of the DLP pipeline
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Redaction function configuration
#[derive(Clone, Debug)]
pub struct FunctionConfig {
    pub base: BaseConfig,
    pub project_id: String,
    pub raw_bucket: String,
    pub redacted_bucket: String,
    pub bq_dataset_id: String,
    pub log_name: String,
    // Google API endpoints (overridable for emulators and tests)
    pub dlp_api_url: String,
    pub logging_api_url: String,
    pub cloud_logging_enabled: bool,
    // Credentials
    pub auth_mode: GcpAuthMode,
    pub access_token: Option<String>,
    pub metadata_url: String,
    pub http_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FunctionConfig>);

impl Config {
    fn inner(&self) -> &FunctionConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = FunctionConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn project_id(&self) -> &str {
        &self.inner().project_id
    }

    pub fn raw_bucket(&self) -> &str {
        &self.inner().raw_bucket
    }

    pub fn redacted_bucket(&self) -> &str {
        &self.inner().redacted_bucket
    }

    pub fn bq_dataset_id(&self) -> &str {
        &self.inner().bq_dataset_id
    }

    pub fn log_name(&self) -> &str {
        &self.inner().log_name
    }

    pub fn dlp_api_url(&self) -> &str {
        &self.inner().dlp_api_url
    }

    pub fn logging_api_url(&self) -> &str {
        &self.inner().logging_api_url
    }

    pub fn cloud_logging_enabled(&self) -> bool {
        self.inner().cloud_logging_enabled
    }

    pub fn auth_mode(&self) -> GcpAuthMode {
        self.inner().auth_mode
    }

    pub fn access_token(&self) -> Option<&str> {
        self.inner().access_token.as_deref()
    }

    pub fn metadata_url(&self) -> &str {
        &self.inner().metadata_url
    }

    pub fn http_timeout_secs(&self) -> u64 {
        self.inner().http_timeout_secs
    }
}

impl FunctionConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: get("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            log_format: get("LOG_FORMAT")
                .map(|s| s.parse::<LogFormat>())
                .transpose()?
                .unwrap_or(LogFormat::Compact),
        };

        let project_id = get("DLP_PROJECT_ID")
            .or_else(|| get("GOOGLE_CLOUD_PROJECT"))
            .ok_or_else(|| {
                anyhow::anyhow!("DLP_PROJECT_ID (or GOOGLE_CLOUD_PROJECT) must be set")
            })?;

        let config = Self {
            base,
            project_id: project_id.trim().to_string(),
            raw_bucket: get("RAW_BUCKET").unwrap_or_else(|| DEFAULT_RAW_BUCKET.to_string()),
            redacted_bucket: get("REDACTED_BUCKET")
                .unwrap_or_else(|| DEFAULT_REDACTED_BUCKET.to_string()),
            bq_dataset_id: get("BQ_DATASET_ID")
                .unwrap_or_else(|| DEFAULT_BQ_DATASET_ID.to_string()),
            log_name: get("LOG_NAME").unwrap_or_else(|| DEFAULT_LOG_NAME.to_string()),
            dlp_api_url: get("DLP_API_URL")
                .unwrap_or_else(|| DEFAULT_DLP_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            logging_api_url: get("LOGGING_API_URL")
                .unwrap_or_else(|| DEFAULT_LOGGING_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            cloud_logging_enabled: get("CLOUD_LOGGING_ENABLED")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            auth_mode: get("GCP_AUTH_MODE")
                .map(|s| s.parse::<GcpAuthMode>())
                .transpose()?
                .unwrap_or(GcpAuthMode::Metadata),
            access_token: get("GOOGLE_OAUTH_ACCESS_TOKEN"),
            metadata_url: get("GCE_METADATA_URL")
                .unwrap_or_else(|| DEFAULT_METADATA_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout_secs: get("DLP_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(HTTP_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.project_id.is_empty() || self.project_id.contains('/') {
            return Err(anyhow::anyhow!(
                "DLP_PROJECT_ID must be a bare project id (got '{}')",
                self.project_id
            ));
        }

        for (key, bucket) in [
            ("RAW_BUCKET", &self.raw_bucket),
            ("REDACTED_BUCKET", &self.redacted_bucket),
        ] {
            if bucket.starts_with("gs://") || bucket.contains('/') {
                return Err(anyhow::anyhow!(
                    "{} must be a bucket name without scheme or path (got '{}')",
                    key,
                    bucket
                ));
            }
        }

        for (key, url) in [
            ("DLP_API_URL", &self.dlp_api_url),
            ("LOGGING_API_URL", &self.logging_api_url),
            ("GCE_METADATA_URL", &self.metadata_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} must be an http(s) URL", key));
            }
        }

        if self.auth_mode == GcpAuthMode::Static && self.access_token.is_none() {
            return Err(anyhow::anyhow!(
                "GCP_AUTH_MODE=static requires GOOGLE_OAUTH_ACCESS_TOKEN to be set"
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!("DLP_HTTP_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }
}
