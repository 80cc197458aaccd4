//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, DocumentError, OtpError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl DomainError {
    /// Shorthand for an internal failure carrying a diagnostic message
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Machine-readable error code used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Forbidden { .. } => "FORBIDDEN",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Otp(e) => e.code(),
            DomainError::Auth(e) => e.code(),
            DomainError::Token(e) => e.code(),
            DomainError::Document(e) => e.code(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
