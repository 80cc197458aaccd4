//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `onboard_core`:
//!
//! - **Database**: MySQL customer repository and connection pool using SQLx
//! - **Email**: OTP delivery through a transactional mail HTTP API, or a
//!   logging mock for development
//! - **Storage**: uploaded document bytes on the local filesystem
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use onboard_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - OTP delivery providers
pub mod email;

/// Storage module - document blob store
pub mod storage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider error
    #[error("Email service error: {0}")]
    Email(String),

    /// Blob storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
