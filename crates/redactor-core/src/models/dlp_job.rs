use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Lifecycle state reported by the DLP service for a job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    #[default]
    JobStateUnspecified,
    Pending,
    Running,
    Done,
    Canceled,
    Failed,
    Active,
    #[serde(other)]
    Unknown,
}

impl Display for JobState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JobState::JobStateUnspecified => write!(f, "JOB_STATE_UNSPECIFIED"),
            JobState::Pending => write!(f, "PENDING"),
            JobState::Running => write!(f, "RUNNING"),
            JobState::Done => write!(f, "DONE"),
            JobState::Canceled => write!(f, "CANCELED"),
            JobState::Failed => write!(f, "FAILED"),
            JobState::Active => write!(f, "ACTIVE"),
            JobState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Job handle returned by `projects.dlpJobs.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlpJob {
    pub name: String,
    #[serde(default)]
    pub state: JobState,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_job_handle() {
        let job: DlpJob = serde_json::from_value(json!({
            "name": "projects/proj1/dlpJobs/i-123",
            "type": "INSPECT_JOB",
            "state": "PENDING",
            "createTime": "2024-01-01T00:00:00Z",
            "inspectDetails": {}
        }))
        .unwrap();

        assert_eq!(job.name, "projects/proj1/dlpJobs/i-123");
        assert_eq!(job.state, JobState::Pending);
        assert_eq!(job.job_type.as_deref(), Some("INSPECT_JOB"));
    }

    #[test]
    fn test_unknown_state_does_not_fail_parsing() {
        let job: DlpJob = serde_json::from_value(json!({
            "name": "projects/proj1/dlpJobs/i-1",
            "state": "SOMETHING_NEW"
        }))
        .unwrap();
        assert_eq!(job.state, JobState::Unknown);
    }

    #[test]
    fn test_missing_state_defaults_to_unspecified() {
        let job: DlpJob =
            serde_json::from_value(json!({ "name": "projects/proj1/dlpJobs/i-1" })).unwrap();
        assert_eq!(job.state.to_string(), "JOB_STATE_UNSPECIFIED");
    }
}
