//! Cloud DLP v2 access

pub(crate) mod rest;

pub use rest::DlpRestClient;

use async_trait::async_trait;
use redactor_core::models::{DeidentifyTemplate, DlpJob, InspectJob};

use crate::error::DlpError;

/// The two DLP operations a redaction needs
///
/// `parent` is the resource parent, `projects/{project_id}`.
#[async_trait]
pub trait DlpService: Send + Sync {
    /// Register a de-identification template and return its resource name.
    async fn create_deidentify_template(
        &self,
        parent: &str,
        template: &DeidentifyTemplate,
    ) -> Result<String, DlpError>;

    /// Submit an inspect job. The returned handle is the job as first accepted,
    /// not its final outcome.
    async fn create_dlp_job(&self, parent: &str, job: &InspectJob) -> Result<DlpJob, DlpError>;
}
