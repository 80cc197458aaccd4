//! Request and response bodies for the HTTP API

pub mod auth;
pub mod documents;

pub use auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ResendOtpRequest,
    VerifyEmailRequest,
};
pub use documents::{DocumentListResponse, DocumentQuery, DocumentSummary, DocumentUploadResponse};
pub use onboard_shared::types::{ErrorResponse, HealthResponse, MessageResponse};
