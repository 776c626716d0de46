//! Shared application state

use redactor_core::models::JobTarget;
use redactor_core::Config;
use redactor_services::{AppLogger, JobSubmitter};

/// Process-wide state shared by all requests
///
/// Built once at startup; the DLP client, token cache and logger live here.
pub struct AppState {
    pub config: Config,
    pub submitter: JobSubmitter,
}

impl AppState {
    pub fn new(config: Config, submitter: JobSubmitter) -> Self {
        Self { config, submitter }
    }

    pub fn logger(&self) -> &AppLogger {
        self.submitter.logger()
    }

    /// Job target for `file_name` using the configured project, buckets and dataset
    pub fn job_target(&self, file_name: &str) -> JobTarget {
        JobTarget {
            project_id: self.config.project_id().to_string(),
            file_name: file_name.to_string(),
            raw_bucket: self.config.raw_bucket().to_string(),
            redacted_bucket: self.config.redacted_bucket().to_string(),
            dataset_id: self.config.bq_dataset_id().to_string(),
        }
    }
}
