//! Application log entries
//!
//! Every entry goes to `tracing` first. When a [`LogSink`] is configured the
//! same text is also written to the named Cloud Logging log. Sink failures are
//! reported through `tracing` and never reach the caller.

use anyhow::Context;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use redactor_core::models::LogSeverity;
use redactor_core::Config;
use serde::Serialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenSource;
use crate::dlp::rest::google_error_message;
use crate::error::DlpError;

const API_NAME: &str = "Cloud Logging API";

/// Characters left as-is in the log id segment of `logName`
const LOG_ID: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Destination for application log entries
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn write(&self, severity: LogSeverity, message: &str) -> Result<(), DlpError>;
}

#[derive(Debug, Serialize)]
struct MonitoredResource {
    #[serde(rename = "type")]
    resource_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogEntry<'a> {
    severity: LogSeverity,
    text_payload: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteLogEntriesRequest<'a> {
    log_name: &'a str,
    resource: MonitoredResource,
    entries: Vec<LogEntry<'a>>,
}

/// Writes text entries with `entries.write` against the `global` resource
pub struct CloudLoggingSink {
    http_client: reqwest::Client,
    write_url: String,
    log_name: String,
    tokens: Arc<TokenSource>,
}

impl Debug for CloudLoggingSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudLoggingSink")
            .field("log_name", &self.log_name)
            .finish()
    }
}

impl CloudLoggingSink {
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        project_id: &str,
        log_name: &str,
        tokens: Arc<TokenSource>,
    ) -> Self {
        Self {
            http_client,
            write_url: format!("{}/v2/entries:write", base_url.trim_end_matches('/')),
            log_name: format!(
                "projects/{}/logs/{}",
                project_id,
                utf8_percent_encode(log_name, LOG_ID)
            ),
            tokens,
        }
    }

    pub fn from_config(config: &Config, tokens: Arc<TokenSource>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs()))
            .build()
            .context("Failed to create HTTP client for Cloud Logging API")?;

        Ok(Self::new(
            http_client,
            config.logging_api_url(),
            config.project_id(),
            config.log_name(),
            tokens,
        ))
    }

    /// Full resource name, `projects/{project}/logs/{encoded log name}`
    pub fn log_name(&self) -> &str {
        &self.log_name
    }
}

#[async_trait]
impl LogSink for CloudLoggingSink {
    async fn write(&self, severity: LogSeverity, message: &str) -> Result<(), DlpError> {
        let body = WriteLogEntriesRequest {
            log_name: &self.log_name,
            resource: MonitoredResource {
                resource_type: "global",
            },
            entries: vec![LogEntry {
                severity,
                text_payload: message,
            }],
        };

        let request = self.http_client.post(&self.write_url).json(&body);
        let request = self.tokens.apply_auth(request).await?;
        let response = request.send().await.map_err(|source| DlpError::Request {
            api: API_NAME,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DlpError::Api {
                api: API_NAME,
                status: status.as_u16(),
                message: google_error_message(&error_text),
            });
        }

        Ok(())
    }
}

/// Process-wide application logger
///
/// Cheap to clone; all clones share the same sink.
#[derive(Clone, Default)]
pub struct AppLogger {
    sink: Option<Arc<dyn LogSink>>,
}

impl Debug for AppLogger {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppLogger")
            .field("remote", &self.sink.is_some())
            .finish()
    }
}

impl AppLogger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Logger that only emits `tracing` events
    pub fn tracing_only() -> Self {
        Self { sink: None }
    }

    pub async fn log(&self, message: &str, severity: LogSeverity) {
        match severity {
            LogSeverity::Error => tracing::error!(target: "redactor::app_log", "{}", message),
            LogSeverity::Warning => tracing::warn!(target: "redactor::app_log", "{}", message),
            LogSeverity::Debug => tracing::debug!(target: "redactor::app_log", "{}", message),
            LogSeverity::Info | LogSeverity::Default => {
                tracing::info!(target: "redactor::app_log", "{}", message)
            }
        }

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.write(severity, message).await {
                tracing::warn!(error = %e, severity = %severity, "Failed to write Cloud Logging entry");
            }
        }
    }

    pub async fn info(&self, message: &str) {
        self.log(message, LogSeverity::Info).await
    }

    pub async fn warning(&self, message: &str) {
        self.log(message, LogSeverity::Warning).await
    }

    pub async fn error(&self, message: &str) {
        self.log(message, LogSeverity::Error).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::RecordingSink;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_log_name_is_url_encoded() {
        let sink = CloudLoggingSink::new(
            reqwest::Client::new(),
            "https://logging.googleapis.com/",
            "proj1",
            "DLP redaction/demo",
            Arc::new(TokenSource::None),
        );
        assert_eq!(sink.log_name(), "projects/proj1/logs/DLP%20redaction%2Fdemo");
    }

    #[tokio::test]
    async fn test_write_entry_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/entries:write")
            .match_header("authorization", "Bearer tkn")
            .match_body(Matcher::Json(json!({
                "logName": "projects/proj1/logs/DLP-redaction-demo",
                "resource": { "type": "global" },
                "entries": [{ "severity": "INFO", "textPayload": "Creating DLP job" }]
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let sink = CloudLoggingSink::new(
            reqwest::Client::new(),
            &server.url(),
            "proj1",
            "DLP-redaction-demo",
            Arc::new(TokenSource::Static("tkn".to_string())),
        );
        sink.write(LogSeverity::Info, "Creating DLP job").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v2/entries:write")
            .with_status(403)
            .with_body(json!({ "error": { "message": "denied" } }).to_string())
            .create_async()
            .await;

        let sink = CloudLoggingSink::new(
            reqwest::Client::new(),
            &server.url(),
            "proj1",
            "log",
            Arc::new(TokenSource::None),
        );
        let err = sink.write(LogSeverity::Error, "boom").await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_logger_swallows_sink_failures() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/entries:write")
            .with_status(500)
            .create_async()
            .await;

        let logger = AppLogger::new(Arc::new(CloudLoggingSink::new(
            reqwest::Client::new(),
            &server.url(),
            "proj1",
            "log",
            Arc::new(TokenSource::None),
        )));
        logger.error("template creation failed").await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_logger_forwards_severity() {
        let sink = Arc::new(RecordingSink::default());
        let logger = AppLogger::new(sink.clone());
        logger.info("one").await;
        logger.warning("two").await;
        logger.log("three", LogSeverity::Debug).await;
        AppLogger::tracing_only().info("not recorded").await;

        assert_eq!(
            sink.entries(),
            vec![
                (LogSeverity::Info, "one".to_string()),
                (LogSeverity::Warning, "two".to_string()),
                (LogSeverity::Debug, "three".to_string()),
            ]
        );
    }
}
