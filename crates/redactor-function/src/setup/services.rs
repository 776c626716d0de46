//! Google API clients and shared services

use anyhow::{Context, Result};
use redactor_core::Config;
use redactor_services::{
    AppLogger, CloudLoggingSink, DlpRestClient, JobSubmitter, TokenSource,
};
use std::sync::Arc;
use std::time::Duration;

use crate::state::AppState;

/// Build the token source, DLP client and logger once for the whole process.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let metadata_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs()))
        .build()
        .context("Failed to create HTTP client for metadata server")?;
    let tokens = Arc::new(TokenSource::from_config(config, metadata_client)?);
    tracing::info!(auth_mode = %config.auth_mode(), "Google API credentials configured");

    let dlp = DlpRestClient::from_config(config, tokens.clone())?;

    let logger = if config.cloud_logging_enabled() {
        let sink = CloudLoggingSink::from_config(config, tokens)?;
        tracing::info!(log_name = %sink.log_name(), "Cloud Logging enabled");
        AppLogger::new(Arc::new(sink))
    } else {
        tracing::info!("Cloud Logging disabled, application logs go to tracing only");
        AppLogger::tracing_only()
    };

    let submitter = JobSubmitter::new(Arc::new(dlp), logger);

    Ok(Arc::new(AppState::new(config.clone(), submitter)))
}
