use async_trait::async_trait;
use redactor_core::models::{DeidentifyTemplate, JobTarget, LogSeverity, TransformationRule};
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::auth::TokenSource;
use crate::dlp::{DlpRestClient, DlpService};
use crate::error::DlpError;
use crate::logging::LogSink;

pub fn sample_target() -> JobTarget {
    JobTarget {
        project_id: "proj1".to_string(),
        file_name: "patients.csv".to_string(),
        raw_bucket: "raw".to_string(),
        redacted_bucket: "clean".to_string(),
        dataset_id: "results".to_string(),
    }
}

pub fn sample_template() -> DeidentifyTemplate {
    DeidentifyTemplate::new(
        "Demo DeIdentification Template",
        vec![TransformationRule::replace("FIRST_NAME", "FN")],
    )
    .unwrap()
}

pub fn template_response(name: &str) -> String {
    json!({
        "name": name,
        "displayName": "Demo DeIdentification Template",
        "deidentifyConfig": { "infoTypeTransformations": { "transformations": [] } }
    })
    .to_string()
}

pub fn mock_dlp(server: &mockito::ServerGuard) -> Arc<dyn DlpService> {
    Arc::new(DlpRestClient::new(
        reqwest::Client::new(),
        &server.url(),
        Arc::new(TokenSource::None),
    ))
}

/// Sink that keeps entries in memory
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(LogSeverity, String)>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<(LogSeverity, String)> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn write(&self, severity: LogSeverity, message: &str) -> Result<(), DlpError> {
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
        Ok(())
    }
}
