//! Deployment environment and logging settings

use serde::{Deserialize, Serialize};

/// Deployment the server runs as, selected by `ONBOARD_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub const VARIABLE: &'static str = "ONBOARD_ENV";

    pub fn name(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// Reads `ONBOARD_ENV`; unset or unrecognised values mean development.
    pub fn from_env() -> Self {
        std::env::var(Self::VARIABLE)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Optional TOML overlay, e.g. `config/production.toml`
    pub fn config_file(self) -> String {
        format!("config/{}", self.name())
    }

    /// Dotenv file loaded before configuration, e.g. `.env.test`
    pub fn env_file(self) -> String {
        format!(".env.{}", self.name())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Environment::Development, Environment::Test, Environment::Production]
            .into_iter()
            .find(|env| env.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown environment: {}", s))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or full `EnvFilter` directive (e.g. `info,sqlx=warn`)
    pub level: String,

    pub format: LogFormat,

    /// Include file and line in each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

impl LoggingConfig {
    /// Human-readable debug output locally, JSON at info elsewhere
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                source_location: true,
            },
            Environment::Test | Environment::Production => Self {
                level: String::from("info,sqlx=warn"),
                format: LogFormat::Json,
                source_location: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" test ".parse::<Environment>().unwrap(), Environment::Test);
        assert!("prod".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_file_names() {
        assert_eq!(Environment::Test.config_file(), "config/test");
        assert_eq!(Environment::Production.env_file(), ".env.production");
        assert_eq!(Environment::Development.to_string(), "development");
    }

    #[test]
    fn test_logging_defaults() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.source_location);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod.format, LogFormat::Json);
        assert_eq!(prod.level, "info,sqlx=warn");
    }
}
