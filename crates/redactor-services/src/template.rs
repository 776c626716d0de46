//! De-identification template registration

use redactor_core::constants::TEMPLATE_DISPLAY_NAME;
use redactor_core::models::{
    info_types, project_parent, CreateDeidentifyTemplateRequest, DeidentifyTemplate,
    TransformationRule,
};
use std::sync::Arc;

use crate::dlp::DlpService;
use crate::error::DlpError;
use crate::logging::AppLogger;

/// The fixed redaction rules: names and phone numbers are replaced outright,
/// emails and street addresses keep all but their last four characters.
pub fn deidentify_template() -> Result<DeidentifyTemplate, DlpError> {
    let rules = vec![
        TransformationRule::replace(info_types::FIRST_NAME, "FN"),
        TransformationRule::replace(info_types::LAST_NAME, "LN"),
        TransformationRule::replace(info_types::PHONE_NUMBER, "1"),
        TransformationRule::mask_trailing(info_types::EMAIL_ADDRESS, '*', 4),
        TransformationRule::mask_trailing(info_types::STREET_ADDRESS, 'L', 4),
    ];

    DeidentifyTemplate::new(TEMPLATE_DISPLAY_NAME, rules)
        .map_err(|e| DlpError::InvalidTemplate(e.to_string()))
}

/// Registers a new copy of the redaction template on every call
#[derive(Clone)]
pub struct TemplateBuilder {
    dlp: Arc<dyn DlpService>,
    logger: AppLogger,
}

impl TemplateBuilder {
    pub fn new(dlp: Arc<dyn DlpService>, logger: AppLogger) -> Self {
        Self { dlp, logger }
    }

    /// Register the template under `projects/{project_id}` and return its name.
    #[tracing::instrument(skip(self))]
    pub async fn create_deidentify_template(&self, project_id: &str) -> Result<String, DlpError> {
        self.logger
            .info(&format!(
                "Creating de-identification template for project {}",
                project_id
            ))
            .await;

        let template = match deidentify_template() {
            Ok(template) => template,
            Err(e) => {
                self.logger
                    .error(&format!("Failed to build de-identification template: {}", e))
                    .await;
                return Err(e);
            }
        };
        let request = CreateDeidentifyTemplateRequest {
            deidentify_template: &template,
            template_id: None,
        };
        match serde_json::to_string(&request) {
            Ok(body) => {
                self.logger
                    .info(&format!("De-identification template request: {}", body))
                    .await
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize template request for logging"),
        }

        let parent = project_parent(project_id);
        match self.dlp.create_deidentify_template(&parent, &template).await {
            Ok(name) => {
                self.logger
                    .info(&format!("Created de-identification template {}", name))
                    .await;
                Ok(name)
            }
            Err(e) => {
                self.logger
                    .error(&format!(
                        "Failed to create de-identification template for project {}: {}",
                        project_id, e
                    ))
                    .await;
                Err(e)
            }
        }
    }
}
