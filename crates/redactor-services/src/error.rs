use redactor_core::AppError;
use thiserror::Error;

/// Failure talking to a Google REST API
#[derive(Error, Debug)]
pub enum DlpError {
    #[error("Failed to send request to {api}: {source}")]
    Request {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{api} returned {status}: {message}")]
    Api {
        api: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to parse {api} response: {source}")]
    Decode {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected {api} response: {message}")]
    InvalidResponse { api: &'static str, message: String },

    #[error("Invalid de-identification template: {0}")]
    InvalidTemplate(String),

    #[error("Failed to obtain access token: {0}")]
    Auth(String),
}

impl DlpError {
    /// HTTP status returned by the API, if the request reached it
    pub fn status(&self) -> Option<u16> {
        match self {
            DlpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of one template-then-job submission
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("De-identification template could not be created: {0}")]
    Template(#[source] DlpError),

    #[error("DLP job using template {template_name} could not be created: {source}")]
    Job {
        template_name: String,
        #[source]
        source: DlpError,
    },
}

impl SubmitError {
    fn cause(&self) -> &DlpError {
        match self {
            SubmitError::Template(source) => source,
            SubmitError::Job { source, .. } => source,
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        if let DlpError::Auth(message) = err.cause() {
            return AppError::Credentials(message.clone());
        }
        match err {
            SubmitError::Template(source) => AppError::TemplateCreation(source.to_string()),
            err @ SubmitError::Job { .. } => AppError::JobSubmission(err.to_string()),
        }
    }
}
