//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("max_turns must be at least 1")]
    InvalidMaxTurns,

    #[error("context_window_turns must be at least 1")]
    InvalidContextWindow,

    #[error("AI timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("AI max_retries must be at most 10")]
    InvalidMaxRetries,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("AI base URL must use HTTPS in production")]
    BaseUrlMustBeHttps,
}
