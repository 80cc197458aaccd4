//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT signing and password hashing
//! - `database` - Database connection and pool configuration
//! - `documents` - Identity document upload limits and storage
//! - `email` - Outbound mail provider
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time passcode issuance and resend throttling
//! - `server` - HTTP server and CORS configuration
//!
//! Values are layered: environment defaults, then an optional
//! `config/<environment>.toml`, then `APP__<SECTION>__<KEY>` variables,
//! then the conventional `DATABASE_URL`, `JWT_SECRET` and `PORT`.

pub mod auth;
pub mod database;
pub mod documents;
pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{JwtConfig, DEFAULT_JWT_SECRET};
pub use database::DatabaseConfig;
pub use documents::DocumentConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, VerifiedResubmission};
pub use server::{CorsConfig, ServerConfig};

/// Errors raised while assembling configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("JWT_SECRET must be set in production")]
    InsecureSecret,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// OTP configuration
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Document upload configuration
    pub documents: DocumentConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults tuned for an environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            documents: DocumentConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }

    /// Load configuration for a specific environment
    pub fn load_for(env: Environment) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::for_environment(env))?;

        let mut builder = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(&env.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", env.to_string())?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", secret)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a valid port: {}", port)))?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot run safely
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::InsecureSecret);
        }
        if self.otp.resend_interval_seconds < 0 {
            return Err(ConfigError::Invalid(
                "otp.resend_interval_seconds must not be negative".to_string(),
            ));
        }
        if !(4..=10).contains(&self.otp.code_length) {
            return Err(ConfigError::Invalid(
                "otp.code_length must be between 4 and 10".to_string(),
            ));
        }
        if self.documents.max_file_size_bytes == 0 {
            return Err(ConfigError::Invalid(
                "documents.max_file_size_bytes must be positive".to_string(),
            ));
        }
        if self.jwt.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "jwt.access_token_expiry must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
