//! Email Service Module
//!
//! Delivers one-time passcodes to a customer's inbox. Two providers exist:
//!
//! - **Mock**: logs a masked address and counts messages (development)
//! - **Http**: posts the message to a transactional mail HTTP API
//!
//! [`create_email_service`] picks one from [`EmailConfig`].

pub mod http_email;
pub mod mock_email;


use async_trait::async_trait;
use serde::Serialize;

use onboard_core::services::otp::{OtpDelivery, OtpPurpose};
use onboard_shared::config::EmailConfig;

pub use http_email::HttpEmailService;
pub use mock_email::MockEmailService;

/// An outbound email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    /// Build the message that carries an OTP
    pub fn otp(from: &str, to: &str, code: &str, purpose: OtpPurpose) -> Self {
        let subject = match purpose {
            OtpPurpose::Registration => "Verify your email address",
            OtpPurpose::Resend => "Your new verification code",
        };
        let text = format!(
            "Your verification code is {}.\n\nEnter this code to verify your email address. \
             If you did not request it, you can ignore this message.",
            code
        );
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            text,
        }
    }
}

/// Provider selected at startup
#[derive(Clone)]
pub enum EmailService {
    Mock(MockEmailService),
    Http(HttpEmailService),
}

impl EmailService {
    pub fn provider_name(&self) -> &'static str {
        match self {
            EmailService::Mock(_) => "mock",
            EmailService::Http(_) => "http",
        }
    }
}

#[async_trait]
impl OtpDelivery for EmailService {
    async fn send_otp(&self, email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String> {
        match self {
            EmailService::Mock(service) => service.send_otp(email, code, purpose).await,
            EmailService::Http(service) => service.send_otp(email, code, purpose).await,
        }
    }
}

/// Create an email service based on configuration
///
/// Unknown providers, and an `http` provider missing its URL or key, fall
/// back to the mock with a warning.
pub fn create_email_service(config: &EmailConfig) -> EmailService {
    match config.provider.as_str() {
        "mock" => EmailService::Mock(MockEmailService::new(&config.from_address)),
        "http" => {
            if !config.is_http_ready() {
                tracing::warn!("HTTP email provider is missing api_url or api_key, using mock email service");
                return EmailService::Mock(MockEmailService::new(&config.from_address));
            }
            match HttpEmailService::new(config) {
                Ok(service) => EmailService::Http(service),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialize HTTP email service");
                    tracing::warn!("Falling back to mock email service");
                    EmailService::Mock(MockEmailService::new(&config.from_address))
                }
            }
        }
        other => {
            tracing::warn!(provider = other, "Unknown email provider, using mock implementation");
            EmailService::Mock(MockEmailService::new(&config.from_address))
        }
    }
}
