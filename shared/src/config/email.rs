//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Provider name: `mock` or `http`
    pub provider: String,

    /// Base URL of the HTTP mail API
    pub api_url: String,

    /// Bearer key for the mail API
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Retries after the first failed attempt
    pub max_retries: u32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@onboard.local"),
            max_retries: 2,
            timeout_seconds: 10,
        }
    }
}

impl EmailConfig {
    /// Whether the HTTP provider has everything it needs
    pub fn is_http_ready(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}
