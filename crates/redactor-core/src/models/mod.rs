//! Data models for the redaction function
//!
//! Request and response payloads of the DLP v2 REST API, the storage upload event
//! that triggers the function, and the log severity used by the Cloud Logging sink.
//! All DLP types serialize to the camelCase wire format.

mod deidentify;
mod dlp_job;
mod event;
mod inspect_job;
mod severity;

pub use deidentify::*;
pub use dlp_job::*;
pub use event::*;
pub use inspect_job::*;
pub use severity::*;

use serde::{Deserialize, Serialize};

/// Name of a DLP info type (e.g. `EMAIL_ADDRESS`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfoType {
    pub name: String,
}

impl InfoType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Builtin info types handled by the redaction pipeline
pub mod info_types {
    pub const FIRST_NAME: &str = "FIRST_NAME";
    pub const LAST_NAME: &str = "LAST_NAME";
    pub const PHONE_NUMBER: &str = "PHONE_NUMBER";
    pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
    pub const STREET_ADDRESS: &str = "STREET_ADDRESS";
}

/// Parent resource path for project-scoped DLP calls
pub fn project_parent(project_id: &str) -> String {
    format!("projects/{}", project_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_parent() {
        assert_eq!(project_parent("proj1"), "projects/proj1");
    }

    #[test]
    fn test_info_type_wire_format() {
        let json = serde_json::to_value(InfoType::new(info_types::EMAIL_ADDRESS)).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "EMAIL_ADDRESS" }));
    }
}
