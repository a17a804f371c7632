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
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Endpoint path must start with '/': {0}")]
    InvalidEndpointPath(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid script load timeout")]
    InvalidScriptTimeout,

    #[error("Invalid capture delays: {0}")]
    InvalidCaptureDelays(String),
}
