//! Mock answer store for testing.
//!
//! # Panics
//!
//! Methods panic if an internal lock is poisoned.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::panel::AnswerSubmission;
use crate::ports::{AnswerStore, SaveAnswerError};

/// Answer store that keeps submissions in memory.
#[derive(Debug, Default)]
pub struct MockAnswerStore {
    saved: Mutex<Vec<AnswerSubmission>>,
    failure: Option<SaveAnswerError>,
}

impl MockAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every save fail with `error`.
    pub fn failing_with(error: SaveAnswerError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<AnswerSubmission> {
        self.saved.lock().expect("answer store lock poisoned").clone()
    }
}

#[async_trait]
impl AnswerStore for MockAnswerStore {
    async fn save_answer(&self, submission: &AnswerSubmission) -> Result<(), SaveAnswerError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.saved
            .lock()
            .expect("answer store lock poisoned")
            .push(submission.clone());
        Ok(())
    }
}
