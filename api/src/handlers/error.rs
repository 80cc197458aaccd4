//! Conversion of domain errors into HTTP responses.
//!
//! Client-facing failures carry a specific message. Anything unexpected
//! collapses to a 500 whose message is fixed per endpoint, so internal
//! detail never reaches the body.

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use onboard_core::errors::{AuthError, DocumentError, DomainError, OtpError};

use crate::dto::ErrorResponse;

/// The endpoint an error came from. Selects the fixed server-error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    VerifyEmail,
    ResendOtp,
    UploadDocument,
    ListDocuments,
}

impl Operation {
    pub fn server_error_message(self) -> &'static str {
        match self {
            Operation::Register => "Error registering customer",
            Operation::Login => "Error logging in",
            Operation::VerifyEmail => "Error verifying email",
            Operation::ResendOtp => "Error resending OTP",
            Operation::UploadDocument => "Error uploading document",
            Operation::ListDocuments => "Error fetching documents",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::VerifyEmail => "verify_email",
            Operation::ResendOtp => "resend_otp",
            Operation::UploadDocument => "upload_document",
            Operation::ListDocuments => "list_documents",
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError, operation: Operation) -> HttpResponse {
    let (status, message) = status_and_message(&error, operation);

    if status.is_server_error() {
        tracing::error!(
            operation = operation.as_str(),
            error = %error,
            event = "request_failed",
            "Unexpected error while handling request"
        );
    } else {
        tracing::debug!(
            operation = operation.as_str(),
            code = error.code(),
            status = status.as_u16(),
            "Request rejected"
        );
    }

    let mut body = ErrorResponse::new(error.code(), message);
    if let DomainError::Otp(OtpError::TooSoon { retry_after_seconds }) = &error {
        body = body.with_detail("retry_after_seconds", serde_json::json!(retry_after_seconds));
    }

    HttpResponse::build(status).json(body)
}

/// Fixed 500 body for an endpoint
pub fn server_error(operation: Operation) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "SERVER_ERROR",
        operation.server_error_message(),
    ))
}

/// 400 body listing field validation failures
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new("VALIDATION_ERROR", first_validation_message(errors))
            .with_detail("validation_errors", serde_json::json!(errors)),
    )
}

fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request data".to_string())
}

fn status_and_message(error: &DomainError, operation: Operation) -> (StatusCode, String) {
    match error {
        DomainError::Otp(otp) => match otp {
            OtpError::CustomerNotFound => (StatusCode::NOT_FOUND, "Customer not found".into()),
            OtpError::TooSoon { .. } => (
                StatusCode::BAD_REQUEST,
                "Please wait before requesting a new OTP.".into(),
            ),
            OtpError::InvalidOtp => (StatusCode::BAD_REQUEST, "Invalid OTP".into()),
            OtpError::AlreadyVerified => (StatusCode::CONFLICT, "Email already verified".into()),
            OtpError::InvalidInput { .. } => server_failure(operation),
        },
        DomainError::Auth(auth) => match auth {
            AuthError::EmailAlreadyRegistered => {
                (StatusCode::BAD_REQUEST, "Customer already exists".into())
            }
            AuthError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid email or password".into())
            }
            AuthError::EmailNotVerified => (
                StatusCode::FORBIDDEN,
                "Please verify your email before logging in".into(),
            ),
        },
        DomainError::Document(document) => match document {
            DocumentError::NoFile => (StatusCode::BAD_REQUEST, "No file uploaded".into()),
            DocumentError::FileTooLarge { max_bytes } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File exceeds the {} byte limit", max_bytes),
            ),
            DocumentError::UnsupportedFileType { .. } => {
                (StatusCode::BAD_REQUEST, "Unsupported file type".into())
            }
            DocumentError::CustomerNotFound => {
                (StatusCode::NOT_FOUND, "Customer not found".into())
            }
        },
        DomainError::Token(token) => (StatusCode::UNAUTHORIZED, token.to_string()),
        DomainError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        DomainError::NotFound { resource } => {
            (StatusCode::NOT_FOUND, format!("{} not found", resource))
        }
        DomainError::Forbidden { message } => (StatusCode::FORBIDDEN, message.clone()),
        DomainError::Internal { .. } => server_failure(operation),
    }
}

fn server_failure(operation: Operation) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        operation.server_error_message().to_string(),
    )
}
