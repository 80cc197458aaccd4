//! Shared utilities and common types for the Onboard server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelopes
//! - Utility functions (email validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, EmailConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, OtpConfig, ServerConfig, VerifiedResubmission,
};
pub use types::{ErrorResponse, MessageResponse};
pub use utils::validation;
