use serde::{Deserialize, Serialize};

use super::InfoType;
use crate::constants::{DEIDENTIFIED_PREFIX, GCS_SCHEME};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectConfig {
    pub info_types: Vec<InfoType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudStorageOptions {
    pub file_set: FileSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub cloud_storage_options: CloudStorageOptions,
}

/// BigQuery table reference; without `table_id` the service creates a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigQueryTable {
    pub project_id: String,
    pub dataset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationConfig {
    pub deidentify_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationDetailsStorageConfig {
    pub table: BigQueryTable,
}

/// De-identify the scanned object and write the result to Cloud Storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyAction {
    pub transformation_config: TransformationConfig,
    pub cloud_storage_output: String,
    pub transformation_details_storage_config: TransformationDetailsStorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputStorageConfig {
    pub table: BigQueryTable,
}

/// Save raw findings to BigQuery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFindingsAction {
    pub output_config: OutputStorageConfig,
}

/// Action run when the inspect job completes
///
/// Jobs built by this crate carry a single `Deidentify` action. `SaveFindings`
/// is part of the wire shape but is never produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "deidentify")]
    Deidentify(DeidentifyAction),
    #[serde(rename = "saveFindings")]
    SaveFindings(SaveFindingsAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectJob {
    pub inspect_config: InspectConfig,
    pub storage_config: StorageConfig,
    pub actions: Vec<Action>,
}

/// Where a job reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTarget {
    pub project_id: String,
    pub file_name: String,
    pub raw_bucket: String,
    pub redacted_bucket: String,
    pub dataset_id: String,
}

impl JobTarget {
    /// `gs://{raw_bucket}/{file_name}`
    pub fn source_url(&self) -> String {
        format!("{}{}/{}", GCS_SCHEME, self.raw_bucket, self.file_name)
    }

    /// `gs://{redacted_bucket}/deidentified_content/`
    pub fn output_url(&self) -> String {
        format!("{}{}/{}", GCS_SCHEME, self.redacted_bucket, DEIDENTIFIED_PREFIX)
    }
}

impl InspectJob {
    /// Build the de-identification job for `target` using an already registered template.
    pub fn deidentify(target: &JobTarget, info_types: &[&str], template_name: &str) -> Self {
        Self {
            inspect_config: InspectConfig {
                info_types: info_types.iter().map(|name| InfoType::new(*name)).collect(),
            },
            storage_config: StorageConfig {
                cloud_storage_options: CloudStorageOptions {
                    file_set: FileSet {
                        url: target.source_url(),
                    },
                },
            },
            actions: vec![Action::Deidentify(DeidentifyAction {
                transformation_config: TransformationConfig {
                    deidentify_template: template_name.to_string(),
                },
                cloud_storage_output: target.output_url(),
                transformation_details_storage_config: TransformationDetailsStorageConfig {
                    table: BigQueryTable {
                        project_id: target.project_id.clone(),
                        dataset_id: target.dataset_id.clone(),
                        table_id: None,
                    },
                },
            })],
        }
    }
}

/// Body of `projects.dlpJobs.create`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDlpJobRequest<'a> {
    pub inspect_job: &'a InspectJob,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}
