//! Storage upload event handler

use axum::{extract::State, http::HeaderMap, Json};
use redactor_core::models::{JobState, UploadEvent};
use redactor_core::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Body returned once the DLP service has accepted the job
#[derive(Debug, Serialize, Deserialize)]
pub struct JobSubmittedResponse {
    pub job_name: String,
    pub state: JobState,
    pub template_name: String,
    pub source_url: String,
}

/// CloudEvents type sent when an object upload completes
pub const FINALIZED_EVENT_TYPE: &str = "google.cloud.storage.object.v1.finalized";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Submit a de-identification job for the uploaded object named in the event.
///
/// Accepts the storage object JSON directly (CloudEvents binary mode) or wrapped
/// in a `{"data": ...}` envelope.
#[tracing::instrument(skip(state, headers, body))]
pub async fn handle_upload_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(body): ValidatedJson<JsonValue>,
) -> Result<Json<JobSubmittedResponse>, HttpAppError> {
    tracing::debug!(
        ce_type = header(&headers, "ce-type"),
        ce_subject = header(&headers, "ce-subject"),
        "Received storage event"
    );

    if let Some(event_type) = header(&headers, "ce-type") {
        if event_type != FINALIZED_EVENT_TYPE {
            return Err(AppError::BadRequest(format!(
                "Unsupported event type {}, expected {}",
                event_type, FINALIZED_EVENT_TYPE
            ))
            .into());
        }
    }

    let event = UploadEvent::from_json(body)?;
    let file_name = event.object_name()?;

    tracing::info!(
        file_name = %file_name,
        bucket = event.bucket.as_deref(),
        content_type = event.content_type.as_deref(),
        size = event.size.as_deref(),
        generation = event.generation.as_deref(),
        "Processing uploaded object"
    );
    if let Some(bucket) = event.bucket.as_deref() {
        if bucket != state.config.raw_bucket() {
            tracing::warn!(
                event_bucket = %bucket,
                raw_bucket = %state.config.raw_bucket(),
                "Event bucket differs from the configured raw bucket; scanning the raw bucket"
            );
        }
    }

    state
        .logger()
        .info(&format!("File uploaded: {}", file_name))
        .await;

    let target = state.job_target(file_name);
    let submitted = state.submitter.create_dlp_job(&target).await?;

    state
        .logger()
        .info(&format!(
            "DLP Job {} has a state {}.",
            submitted.job.name, submitted.job.state
        ))
        .await;

    Ok(Json(JobSubmittedResponse {
        job_name: submitted.job.name,
        state: submitted.job.state,
        template_name: submitted.template_name,
        source_url: submitted.source_url,
    }))
}
