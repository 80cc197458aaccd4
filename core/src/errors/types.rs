//! Error types for the OTP lifecycle, authentication, bearer tokens and
//! document uploads
//!
//! Messages here are diagnostic. The HTTP layer owns the client-facing text.

use thiserror::Error;

/// One-time passcode lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Resend requested too soon: retry in {retry_after_seconds}s")]
    TooSoon { retry_after_seconds: i64 },

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl OtpError {
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            OtpError::TooSoon { .. } => "OTP_RESEND_TOO_SOON",
            OtpError::InvalidOtp => "INVALID_OTP",
            OtpError::AlreadyVerified => "ALREADY_VERIFIED",
            OtpError::InvalidInput { .. } => "SERVER_ERROR",
        }
    }
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::EmailAlreadyRegistered => "CUSTOMER_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::EmailNotVerified => "EMAIL_NOT_VERIFIED",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => "MISSING_TOKEN",
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Identity document upload errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("No file uploaded")]
    NoFile,

    #[error("File exceeds {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    #[error("Unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },

    #[error("Customer not found")]
    CustomerNotFound,
}

impl DocumentError {
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::NoFile => "NO_FILE_UPLOADED",
            DocumentError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            DocumentError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            DocumentError::CustomerNotFound => "CUSTOMER_NOT_FOUND",
        }
    }
}
