//! Answer Store Port - Interface for the save action.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::panel::AnswerSubmission;

/// Fallback message when the save endpoint gives no reason.
pub const SAVE_ANSWER_FAILED: &str = "Failed to save answer";

/// Errors from saving an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveAnswerError {
    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl SaveAnswerError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        SaveAnswerError::Rejected {
            status,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| SAVE_ANSWER_FAILED.to_string()),
        }
    }
}

/// Port for persisting a generated answer outside the panel.
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Saves one answer.
    async fn save_answer(&self, submission: &AnswerSubmission) -> Result<(), SaveAnswerError>;
}
