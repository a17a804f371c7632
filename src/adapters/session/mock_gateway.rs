//! Mock session gateway for testing.
//!
//! Returns scripted credential-exchange outcomes in order and records
//! every request it receives.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockSessionGateway::new().with_secret("cs_test");
//! let credential = gateway.create_session(&request).await?;
//! assert_eq!(gateway.call_count(), 1);
//! ```
//!
//! # Panics
//!
//! Methods panic if an internal lock is poisoned.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::session::{SessionCredential, SessionError, SessionRequest};
use crate::ports::SessionGateway;

const DEFAULT_SECRET: &str = "cs_mock_secret";

/// Session gateway returning queued outcomes.
///
/// Once the queue is empty every call succeeds with a fixed secret.
#[derive(Debug, Default)]
pub struct MockSessionGateway {
    outcomes: Mutex<VecDeque<Result<String, SessionError>>>,
    requests: Mutex<Vec<SessionRequest>>,
    delay: Option<Duration>,
}

impl MockSessionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful exchange.
    pub fn with_secret(self, secret: impl Into<String>) -> Self {
        self.push(Ok(secret.into()));
        self
    }

    /// Queues a failed exchange.
    pub fn with_error(self, error: SessionError) -> Self {
        self.push(Err(error));
        self
    }

    /// Makes every exchange take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("gateway requests lock poisoned").len()
    }

    pub fn requests(&self) -> Vec<SessionRequest> {
        self.requests.lock().expect("gateway requests lock poisoned").clone()
    }

    fn push(&self, outcome: Result<String, SessionError>) {
        self.outcomes
            .lock()
            .expect("gateway outcomes lock poisoned")
            .push_back(outcome);
    }
}

#[async_trait]
impl SessionGateway for MockSessionGateway {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<SessionCredential, SessionError> {
        self.requests
            .lock()
            .expect("gateway requests lock poisoned")
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .expect("gateway outcomes lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_SECRET.to_string()));
        outcome.map(SessionCredential::new)
    }
}
