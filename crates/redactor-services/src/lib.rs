//! Redactor Services Library
//!
//! Google API access for the redaction function:
//! - Access tokens (metadata server, static token, or none for emulators)
//! - The DLP v2 REST client behind the [`DlpService`] trait
//! - The Cloud Logging sink used for application log entries
//! - The template builder and job submitter that drive one redaction

pub mod auth;
pub mod dlp;
pub mod error;
pub mod job;
pub mod logging;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use auth::TokenSource;
pub use dlp::{DlpRestClient, DlpService};
pub use error::{DlpError, SubmitError};
pub use job::{JobSubmitter, SubmittedJob, INSPECTED_INFO_TYPES};
pub use logging::{AppLogger, CloudLoggingSink, LogSink};
pub use template::{deidentify_template, TemplateBuilder};
