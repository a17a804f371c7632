//! Session bootstrapper.
//!
//! Exchanges the configured workflow and the page context for a
//! short-lived credential whenever the widget asks for one.

use std::sync::Arc;

use super::state::PanelStateHandle;
use crate::domain::panel::{ErrorUpdate, PageContext};
use crate::domain::session::{SessionCredential, SessionError, SessionRequest, WorkflowId};
use crate::ports::SessionGateway;

/// Obtains credentials and records the outcome in the panel state.
pub struct SessionBootstrapper {
    gateway: Arc<dyn SessionGateway>,
    workflow_id: String,
    page: PageContext,
    state: PanelStateHandle,
}

impl SessionBootstrapper {
    pub fn new(
        gateway: Arc<dyn SessionGateway>,
        workflow_id: impl Into<String>,
        page: PageContext,
        state: PanelStateHandle,
    ) -> Self {
        Self {
            gateway,
            workflow_id: workflow_id.into(),
            page,
            state,
        }
    }

    /// The configured workflow, if it is usable.
    pub fn workflow(&self) -> Result<WorkflowId, SessionError> {
        WorkflowId::parse(&self.workflow_id)
    }

    /// Fetches a fresh credential.
    ///
    /// `current` is the credential the widget already holds. Only a first
    /// acquisition (`None`) raises the initializing flag, and the flag is
    /// lowered exactly once when the call ends, however it ends. Session
    /// and integration errors are cleared before each exchange, refreshes
    /// included.
    ///
    /// # Errors
    ///
    /// Returns the `SessionError` after storing its message in the
    /// session slot. A missing workflow fails before any network I/O.
    pub async fn obtain_credential(
        &self,
        current: Option<&SessionCredential>,
    ) -> Result<SessionCredential, SessionError> {
        let first_acquisition = current.is_none();
        let Some(generation) = self.state.live_generation() else {
            tracing::debug!("Credential requested while unmounted");
            return self.create(self.workflow()?).await;
        };

        let _initializing = first_acquisition.then(|| {
            self.state
                .update_if_current(generation, |s| s.initializing = true);
            self.state
                .reset_on_drop(generation, |s| s.initializing = false)
        });

        let result = match self.workflow() {
            Ok(workflow) => {
                self.state.update_if_current(generation, |s| {
                    s.errors.apply(
                        ErrorUpdate::new()
                            .session(None)
                            .integration(None)
                            .retryable(false),
                    )
                });
                self.create(workflow).await
            }
            Err(error) => Err(error),
        };

        self.state.update_if_current(generation, |s| match &result {
            Ok(_) => s
                .errors
                .apply(ErrorUpdate::new().session(None).integration(None)),
            Err(error) => s.errors.apply(
                ErrorUpdate::new()
                    .session(Some(error.to_string()))
                    .retryable(error.is_retryable()),
            ),
        });

        result
    }

    async fn create(&self, workflow: WorkflowId) -> Result<SessionCredential, SessionError> {
        let request = SessionRequest::new(workflow, self.page.clone());
        tracing::info!(
            workflow_id = request.workflow_id.as_str(),
            question_template_id = %request.page.question_template_id,
            "Requesting ChatKit session"
        );

        self.gateway.create_session(&request).await.inspect_err(|error| {
            tracing::error!(error = %error, "Failed to create ChatKit session");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockSessionGateway;
    use crate::domain::session::WORKFLOW_NOT_CONFIGURED;
    use std::time::Duration;

    fn mounted_state() -> PanelStateHandle {
        let state = PanelStateHandle::new();
        state.update(|s| {
            s.mounted = true;
            s.generation = s.generation.next();
            s.initializing = false;
        });
        state
    }

    fn bootstrapper(
        gateway: Arc<MockSessionGateway>,
        workflow: &str,
        state: &PanelStateHandle,
    ) -> SessionBootstrapper {
        let page = PageContext::from_query("question_template_id=abc123");
        SessionBootstrapper::new(gateway, workflow, page, state.clone())
    }

    #[tokio::test]
    async fn placeholder_workflow_fails_without_network() {
        let state = mounted_state();
        let gateway = Arc::new(MockSessionGateway::new());

        for workflow in ["", "  ", "wf_replace_me"] {
            let result = bootstrapper(gateway.clone(), workflow, &state)
                .obtain_credential(None)
                .await;
            assert_eq!(result, Err(SessionError::NotConfigured));
        }

        assert_eq!(gateway.call_count(), 0);
        state.read(|s| {
            assert_eq!(s.errors.session.as_deref(), Some(WORKFLOW_NOT_CONFIGURED));
            assert!(!s.errors.retryable);
            assert!(!s.initializing);
        });
    }

    #[tokio::test]
    async fn success_clears_session_and_integration() {
        let state = mounted_state();
        state.update(|s| {
            s.errors
                .apply(ErrorUpdate::new().session(Some("old".into())).integration(Some("x".into())))
        });
        let gateway = Arc::new(MockSessionGateway::new().with_secret("cs_42"));

        let credential = bootstrapper(gateway.clone(), "wf_live", &state)
            .obtain_credential(None)
            .await
            .unwrap();

        assert_eq!(credential.expose(), "cs_42");
        assert_eq!(gateway.requests()[0].page.question_template_id, "abc123");
        state.read(|s| {
            assert_eq!(s.errors.session, None);
            assert_eq!(s.errors.integration, None);
        });
    }

    #[tokio::test]
    async fn failure_records_message_in_session_slot() {
        let state = mounted_state();
        let gateway = Arc::new(
            MockSessionGateway::new().with_error(SessionError::exchange(500, "upstream down")),
        );

        let result = bootstrapper(gateway, "wf_live", &state)
            .obtain_credential(None)
            .await;

        assert!(result.is_err());
        assert_eq!(state.read(|s| s.errors.session.clone()).as_deref(), Some("upstream down"));
    }

    #[tokio::test(start_paused = true)]
    async fn first_acquisition_toggles_initializing() {
        let state = mounted_state();
        let gateway = Arc::new(MockSessionGateway::new().with_delay(Duration::from_millis(50)));
        let boot = Arc::new(bootstrapper(gateway, "wf_live", &state));

        let task = tokio::spawn({
            let boot = boot.clone();
            async move { boot.obtain_credential(None).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(state.read(|s| s.initializing));

        task.await.unwrap().unwrap();
        assert!(!state.read(|s| s.initializing));
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_leaves_initializing_untouched() {
        let state = mounted_state();
        let gateway = Arc::new(MockSessionGateway::new().with_delay(Duration::from_millis(50)));
        let boot = Arc::new(bootstrapper(gateway, "wf_live", &state));
        let existing = SessionCredential::new("cs_old");

        let task = tokio::spawn({
            let boot = boot.clone();
            async move { boot.obtain_credential(Some(&existing)).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!state.read(|s| s.initializing));
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_clears_previous_session_error_before_exchange() {
        let state = mounted_state();
        state.update(|s| {
            s.errors.apply(
                ErrorUpdate::new()
                    .session(Some("upstream down".into()))
                    .integration(Some("lost".into()))
                    .retryable(true),
            )
        });
        let gateway = Arc::new(MockSessionGateway::new().with_delay(Duration::from_millis(50)));
        let boot = Arc::new(bootstrapper(gateway, "wf_live", &state));
        let existing = SessionCredential::new("cs_old");

        let task = tokio::spawn({
            let boot = boot.clone();
            async move { boot.obtain_credential(Some(&existing)).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        state.read(|s| {
            assert_eq!(s.errors.session, None);
            assert_eq!(s.errors.integration, None);
            assert!(!s.errors.retryable);
        });

        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn unconfigured_workflow_keeps_integration_error() {
        let state = mounted_state();
        state.update(|s| s.errors.apply(ErrorUpdate::new().integration(Some("lost".into()))));

        let result = bootstrapper(Arc::new(MockSessionGateway::new()), "", &state)
            .obtain_credential(Some(&SessionCredential::new("cs_old")))
            .await;

        assert_eq!(result, Err(SessionError::NotConfigured));
        assert_eq!(state.read(|s| s.errors.integration.clone()).as_deref(), Some("lost"));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_mid_flight_suppresses_writes() {
        let state = mounted_state();
        let gateway = Arc::new(
            MockSessionGateway::new()
                .with_error(SessionError::MissingClientSecret)
                .with_delay(Duration::from_millis(50)),
        );
        let boot = Arc::new(bootstrapper(gateway, "wf_live", &state));

        let task = tokio::spawn({
            let boot = boot.clone();
            async move { boot.obtain_credential(None).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        state.update(|s| s.mounted = false);

        assert!(task.await.unwrap().is_err());
        state.read(|s| {
            assert_eq!(s.errors.session, None);
            assert!(s.initializing);
        });
    }
}
