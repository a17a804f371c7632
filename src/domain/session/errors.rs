//! Session-specific error types.

use thiserror::Error;

/// Message shown when no usable workflow id is configured.
pub const WORKFLOW_NOT_CONFIGURED: &str =
    "Set CHATKIT_PANEL__PANEL__WORKFLOW_ID in your .env file.";

/// Fallback when a failure carries no message at all.
pub const SESSION_START_FAILED: &str = "Unable to start ChatKit session.";

/// Errors raised while obtaining a session credential.
///
/// The `Display` output is exactly the text stored in the panel's
/// `session` error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The workflow id is empty or still the template placeholder.
    #[error("{}", WORKFLOW_NOT_CONFIGURED)]
    NotConfigured,

    /// The exchange endpoint answered with a non-success status.
    #[error("{detail}")]
    Exchange { status: u16, detail: String },

    /// The exchange succeeded but the body had no `client_secret`.
    #[error("Missing client secret in response")]
    MissingClientSecret,

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
}

impl SessionError {
    pub fn exchange(status: u16, detail: impl Into<String>) -> Self {
        SessionError::Exchange {
            status,
            detail: detail.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            SessionError::Transport(SESSION_START_FAILED.to_string())
        } else {
            SessionError::Transport(message)
        }
    }

    /// Whether a restart could clear this error.
    ///
    /// No session failure is treated as retryable today; the restart
    /// action stays wired for when one is.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
