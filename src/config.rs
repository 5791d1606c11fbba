//! Retry configuration files
//!
//! A YAML file describing retry behavior, loaded by the `backoff` runner and
//! usable by library callers that want file-driven settings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::util::retry::{RetryOptions, DEFAULT_ATTEMPTS, DEFAULT_DELAY_MS};

/// Errors that can occur when loading or validating a retry config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Serializable retry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Message logged on every failed attempt
    pub error_message: Option<String>,
    /// Retries after the first attempt
    pub attempts: u32,
    /// Wait before the first retry, in milliseconds
    pub delay_ms: u64,
    /// Name used in log messages and the final error
    pub operation_name: Option<String>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            error_message: None,
            attempts: DEFAULT_ATTEMPTS,
            delay_ms: DEFAULT_DELAY_MS,
            operation_name: None,
        }
    }
}

impl RetryConfig {
    /// Load a config from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a config from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: RetryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.error_message.as_deref(), Some(m) if m.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "error_message must not be empty".to_string(),
            ));
        }
        if matches!(self.operation_name.as_deref(), Some(n) if n.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "operation_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build retry options using the default logger
    pub fn into_options(self) -> RetryOptions {
        RetryOptions {
            error_message: self.error_message,
            attempts: self.attempts,
            delay_time: Duration::from_millis(self.delay_ms),
            operation_name: self.operation_name,
            ..RetryOptions::default()
        }
    }
}
