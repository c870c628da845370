//! Configuration management for the poll store
//!
//! Loads input limits and logging settings from environment variables.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Input limits enforced when a poll is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum length of a poll id in bytes (default: 44)
    pub max_id_len: usize,

    /// Maximum number of options per poll (default: 64)
    pub max_options: usize,

    /// Maximum length of a single option label in bytes (default: 256)
    pub max_label_len: usize,

    /// Maximum length of the question in bytes (default: 1024)
    pub max_question_len: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_id_len: 44,
            max_options: 64,
            max_label_len: 256,
            max_question_len: 1024,
        }
    }
}

impl StoreConfig {
    /// Load store limits from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            max_id_len: env_limit("POLL_MAX_ID_LENGTH", defaults.max_id_len)?,
            max_options: env_limit("POLL_MAX_OPTIONS", defaults.max_options)?,
            max_label_len: env_limit("POLL_MAX_OPTION_LENGTH", defaults.max_label_len)?,
            max_question_len: env_limit("POLL_MAX_QUESTION_LENGTH", defaults.max_question_len)?,
        })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            max_options: 8, // Small enough to hit in tests
            ..Self::default()
        }
    }
}

/// Read a positive limit, falling back to `default` when the variable is unset
fn env_limit(name: &str, default: usize) -> Result<usize> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(default);
    };

    parse_limit(name, &raw)
}

fn parse_limit(name: &str, raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(Error::internal(format!("{name} must be greater than zero"))),
        Ok(value) => Ok(value),
        Err(_) => Err(Error::internal(format!("Invalid {name}"))),
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Whether log lines should be emitted as JSON
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        let store = StoreConfig::from_env()?;

        let logging = LoggingConfig {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
        };

        Ok(Self { store, logging })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Result<Self> {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };

        Ok(Self {
            store: StoreConfig::for_testing(),
            logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::default();

        assert_eq!(config.max_id_len, 44);
        assert!(config.max_options > 0);
        assert!(config.max_label_len > 0);
        assert!(config.max_question_len > 0);
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(parse_limit("TEST", "12").unwrap(), 12);
        assert_eq!(parse_limit("TEST", " 7 ").unwrap(), 7);

        assert!(matches!(parse_limit("TEST", "0"), Err(Error::Internal { .. })));
        assert!(matches!(parse_limit("TEST", "-3"), Err(Error::Internal { .. })));
        assert!(matches!(parse_limit("TEST", "lots"), Err(Error::Internal { .. })));
    }

    #[test]
    fn test_testing_config() {
        let config = Config::for_testing().unwrap();
        assert_eq!(config.store.max_options, 8);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.is_json());
    }
}
