pub mod health;
pub mod upload_event;

use redactor_core::AppError;

use crate::error::HttpAppError;

/// Fallback for unknown routes
pub async fn not_found() -> HttpAppError {
    AppError::NotFound("No such route".to_string()).into()
}
