//! DLP v2 REST client

use anyhow::Context;
use async_trait::async_trait;
use redactor_core::models::{
    CreateDeidentifyTemplateRequest, CreateDlpJobRequest, DeidentifyTemplate, DlpJob, InspectJob,
};
use redactor_core::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Duration;

use super::DlpService;
use crate::auth::TokenSource;
use crate::error::DlpError;

const API_NAME: &str = "DLP API";

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Pull `error.message` out of a Google API error body, falling back to the raw text.
pub(crate) fn google_error_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => match parsed.error.status {
            Some(status) => format!("{} ({})", parsed.error.message, status),
            None => parsed.error.message,
        },
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.trim().to_string(),
    }
}

pub struct DlpRestClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenSource>,
}

impl Debug for DlpRestClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DlpRestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DlpRestClient {
    pub fn new(http_client: reqwest::Client, base_url: &str, tokens: Arc<TokenSource>) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn from_config(config: &Config, tokens: Arc<TokenSource>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs()))
            .build()
            .context("Failed to create HTTP client for DLP API")?;

        Ok(Self::new(http_client, config.dlp_api_url(), tokens))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, DlpError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/v2/{}", self.base_url, path);
        let request = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body);
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

        response.json().await.map_err(|source| DlpError::Decode {
            api: API_NAME,
            source,
        })
    }
}

#[async_trait]
impl DlpService for DlpRestClient {
    async fn create_deidentify_template(
        &self,
        parent: &str,
        template: &DeidentifyTemplate,
    ) -> Result<String, DlpError> {
        let body = CreateDeidentifyTemplateRequest {
            deidentify_template: template,
            template_id: None,
        };
        let created: DeidentifyTemplate = self
            .post(&format!("{}/deidentifyTemplates", parent), &body)
            .await?;

        created
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DlpError::InvalidResponse {
                api: API_NAME,
                message: "Created template has no resource name".to_string(),
            })
    }

    async fn create_dlp_job(&self, parent: &str, job: &InspectJob) -> Result<DlpJob, DlpError> {
        let body = CreateDlpJobRequest {
            inspect_job: job,
            job_id: None,
        };
        self.post(&format!("{}/dlpJobs", parent), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_target, sample_template};
    use mockito::{Matcher, Server};
    use redactor_core::models::JobState;
    use serde_json::json;

    fn client(server: &mockito::ServerGuard, tokens: TokenSource) -> DlpRestClient {
        DlpRestClient::new(reqwest::Client::new(), &server.url(), Arc::new(tokens))
    }

    #[test]
    fn test_google_error_message() {
        let body = json!({
            "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" }
        })
        .to_string();
        assert_eq!(
            google_error_message(&body),
            "Permission denied (PERMISSION_DENIED)"
        );
        assert_eq!(google_error_message("upstream timeout\n"), "upstream timeout");
        assert_eq!(google_error_message(""), "Unknown error");
    }

    #[tokio::test]
    async fn test_create_template_returns_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/projects/proj1/deidentifyTemplates")
            .match_header("authorization", "Bearer tkn")
            .match_body(Matcher::PartialJson(json!({
                "deidentifyTemplate": { "displayName": "Demo DeIdentification Template" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": "projects/proj1/deidentifyTemplates/123",
                    "displayName": "Demo DeIdentification Template",
                    "deidentifyConfig": { "infoTypeTransformations": { "transformations": [] } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let dlp = client(&server, TokenSource::Static("tkn".to_string()));
        let name = dlp
            .create_deidentify_template("projects/proj1", &sample_template())
            .await
            .unwrap();

        assert_eq!(name, "projects/proj1/deidentifyTemplates/123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_template_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v2/projects/proj1/deidentifyTemplates")
            .with_status(403)
            .with_body(
                json!({ "error": { "code": 403, "message": "DLP API has not been used" } })
                    .to_string(),
            )
            .create_async()
            .await;

        let dlp = client(&server, TokenSource::None);
        let err = dlp
            .create_deidentify_template("projects/proj1", &sample_template())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("DLP API has not been used"));
    }

    #[tokio::test]
    async fn test_template_without_name_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v2/projects/proj1/deidentifyTemplates")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "displayName": "Demo DeIdentification Template",
                    "deidentifyConfig": { "infoTypeTransformations": { "transformations": [] } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server, TokenSource::None)
            .create_deidentify_template("projects/proj1", &sample_template())
            .await
            .unwrap_err();

        assert!(matches!(err, DlpError::InvalidResponse { .. }));
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("no resource name"));
    }

    #[tokio::test]
    async fn test_create_job_parses_handle() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/projects/proj1/dlpJobs")
            .match_body(Matcher::PartialJson(json!({
                "inspectJob": {
                    "storageConfig": {
                        "cloudStorageOptions": { "fileSet": { "url": "gs://raw/patients.csv" } }
                    }
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": "projects/proj1/dlpJobs/i-42",
                    "type": "INSPECT_JOB",
                    "state": "PENDING"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let job = InspectJob::deidentify(
            &sample_target(),
            &["FIRST_NAME"],
            "projects/proj1/deidentifyTemplates/123",
        );
        let handle = client(&server, TokenSource::None)
            .create_dlp_job("projects/proj1", &job)
            .await
            .unwrap();

        assert_eq!(handle.name, "projects/proj1/dlpJobs/i-42");
        assert_eq!(handle.state, JobState::Pending);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_response_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v2/projects/proj1/dlpJobs")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let job = InspectJob::deidentify(&sample_target(), &["FIRST_NAME"], "t");
        let err = client(&server, TokenSource::None)
            .create_dlp_job("projects/proj1", &job)
            .await
            .unwrap_err();
        assert!(matches!(err, DlpError::Decode { .. }));
    }
}
