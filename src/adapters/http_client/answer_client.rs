//! HTTP implementation of the save action.
//!
//! `POST {endpoint}` with `{answer, questionId, userId}`. A non-success
//! response's `error` field, when present, becomes the failure message.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::domain::panel::AnswerSubmission;
use crate::ports::{AnswerStore, SaveAnswerError};

/// Save action over HTTP.
pub struct HttpAnswerStore {
    endpoint: Url,
    client: Client,
}

impl HttpAnswerStore {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn with_client(endpoint: Url, client: Client) -> Self {
        Self { endpoint, client }
    }
}

#[async_trait]
impl AnswerStore for HttpAnswerStore {
    async fn save_answer(&self, submission: &AnswerSubmission) -> Result<(), SaveAnswerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(|e| SaveAnswerError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string));

        tracing::error!(status = status.as_u16(), error = ?message, "Save answer request failed");
        Err(SaveAnswerError::rejected(status.as_u16(), message))
    }
}
