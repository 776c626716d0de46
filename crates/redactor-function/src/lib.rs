//! Redactor Function Library
//!
//! HTTP surface of the redaction function: the storage upload event handler, the
//! health check, error responses, telemetry and server setup.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
