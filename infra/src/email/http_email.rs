//! HTTP Email Service Implementation
//!
//! Posts JSON messages to a transactional mail API authenticated with a
//! bearer key. Server errors, rate limiting and transport failures are
//! retried with exponential backoff; other client errors are not.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use onboard_core::services::otp::{OtpDelivery, OtpPurpose};
use onboard_shared::config::EmailConfig;
use onboard_shared::validation::mask_email;

use super::EmailMessage;
use crate::InfrastructureError;

/// Initial delay between attempts
const RETRY_DELAY_MS: u64 = 200;

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Email service backed by an HTTP API
#[derive(Clone)]
pub struct HttpEmailService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
    max_retries: u32,
}

impl HttpEmailService {
    /// Create a new HTTP email service
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        if !config.is_http_ready() {
            return Err(InfrastructureError::Config(
                "email.api_url and email.api_key are required for the http provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Send a message, retrying transient failures
    pub async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let mut attempt = 0;
        let mut delay = Duration::from_millis(RETRY_DELAY_MS);

        loop {
            attempt += 1;
            debug!(
                attempt = attempt,
                to = %mask_email(&message.to),
                "Sending email"
            );

            match self.post(message).await {
                Ok(message_id) => {
                    info!(
                        to = %mask_email(&message.to),
                        message_id = %message_id,
                        "Email accepted by provider"
                    );
                    return Ok(message_id);
                }
                Err((err, retryable)) => {
                    error!(attempt = attempt, error = %err, "Failed to send email");
                    if !retryable || attempt > self.max_retries {
                        return Err(err);
                    }
                }
            }

            warn!(delay_ms = delay.as_millis() as u64, "Retrying email delivery");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    /// One attempt; the flag says whether a retry may succeed
    async fn post(&self, message: &EmailMessage) -> Result<String, (InfrastructureError, bool)> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| (InfrastructureError::Http(e), true))?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response.json().await.unwrap_or(SendResponse { id: None });
            return Ok(body.id.unwrap_or_else(|| format!("http-{}", uuid::Uuid::new_v4())));
        }

        let retryable = status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
        Err((
            InfrastructureError::Email(format!("Provider responded with {}", status)),
            retryable,
        ))
    }
}

#[async_trait]
impl OtpDelivery for HttpEmailService {
    async fn send_otp(&self, email: &str, code: &str, purpose: OtpPurpose) -> Result<String, String> {
        let message = EmailMessage::otp(&self.from_address, email, code, purpose);
        self.send_email(&message).await.map_err(|e| e.to_string())
    }
}
