//! Redactor Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! the DLP services crate and the HTTP function.

pub mod auth_mode;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use auth_mode::GcpAuthMode;
pub use config::{BaseConfig, Config, FunctionConfig, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
