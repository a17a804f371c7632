//! Generated answers and their submission.

use serde::{Deserialize, Serialize};

use super::page_context::PageContext;
use crate::domain::foundation::ValidationError;

/// Prompt sent on the user's behalf to request an answer.
pub const GENERATE_ANSWER_PROMPT: &str =
    "Generate a comprehensive answer for this question based on our conversation.";

/// Shown in place of an answer when the prompt could not be sent.
pub const GENERATION_FAILED_MESSAGE: &str = "Sorry, there was an error generating the answer.";

/// Body of the save action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub answer: String,
    pub question_id: String,
    pub user_id: String,
}

impl AnswerSubmission {
    /// Builds a submission for `answer` using the page's question and user ids.
    pub fn new(answer: impl Into<String>, page: &PageContext) -> Result<Self, ValidationError> {
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(ValidationError::empty_field("answer"));
        }
        Ok(Self {
            answer,
            question_id: page.question_template_id.clone(),
            user_id: page.user_id.clone(),
        })
    }
}
