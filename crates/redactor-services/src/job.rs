//! DLP job submission for one uploaded object

use redactor_core::models::{info_types, project_parent, DlpJob, InspectJob, JobTarget};
use std::sync::Arc;

use crate::dlp::DlpService;
use crate::error::SubmitError;
use crate::logging::AppLogger;
use crate::template::TemplateBuilder;

/// Info types the inspect job scans for
pub const INSPECTED_INFO_TYPES: [&str; 5] = [
    info_types::FIRST_NAME,
    info_types::LAST_NAME,
    info_types::STREET_ADDRESS,
    info_types::EMAIL_ADDRESS,
    info_types::PHONE_NUMBER,
];

/// Outcome of a successful submission
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    pub job: DlpJob,
    pub template_name: String,
    pub source_url: String,
}

#[derive(Clone)]
pub struct JobSubmitter {
    templates: TemplateBuilder,
    dlp: Arc<dyn DlpService>,
    logger: AppLogger,
}

impl JobSubmitter {
    pub fn new(dlp: Arc<dyn DlpService>, logger: AppLogger) -> Self {
        Self {
            templates: TemplateBuilder::new(dlp.clone(), logger.clone()),
            dlp,
            logger,
        }
    }

    pub fn logger(&self) -> &AppLogger {
        &self.logger
    }

    /// Register a fresh template, then submit the inspect job that de-identifies
    /// `target.file_name` with it.
    ///
    /// A template failure stops here; no job is submitted.
    #[tracing::instrument(skip(self), fields(file_name = %target.file_name))]
    pub async fn create_dlp_job(&self, target: &JobTarget) -> Result<SubmittedJob, SubmitError> {
        self.logger
            .info(&format!("Creating DLP job for file {}", target.file_name))
            .await;

        let template_name = self
            .templates
            .create_deidentify_template(&target.project_id)
            .await
            .map_err(SubmitError::Template)?;
        self.logger
            .info(&format!("Using de-identification template {}", template_name))
            .await;

        let inspect_job = InspectJob::deidentify(target, &INSPECTED_INFO_TYPES, &template_name);
        let parent = project_parent(&target.project_id);

        match self.dlp.create_dlp_job(&parent, &inspect_job).await {
            Ok(job) => {
                self.logger
                    .info(&format!("Created DLP job {}", job.name))
                    .await;
                Ok(SubmittedJob {
                    job,
                    template_name,
                    source_url: target.source_url(),
                })
            }
            Err(source) => {
                self.logger
                    .error(&format!(
                        "Failed to create DLP job for {}: {}",
                        target.source_url(),
                        source
                    ))
                    .await;
                Err(SubmitError::Job {
                    template_name,
                    source,
                })
            }
        }
    }
}
