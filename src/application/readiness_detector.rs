//! Script readiness detector.
//!
//! Watches the widget runtime's load signals for one mount generation.
//! The first of {load complete, load error, timeout} decides the outcome;
//! later signals are ignored. The watcher stops early when its generation
//! is no longer the live one (restart or teardown).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time;

use super::state::PanelStateHandle;
use crate::domain::foundation::{MountGeneration, StateMachine};
use crate::domain::panel::{
    script_error_message, ErrorUpdate, ScriptReadiness, SCRIPT_LOAD_TIMEOUT,
    SCRIPT_UNAVAILABLE_DETAIL,
};
use crate::ports::{ScriptLoadEvent, ScriptRuntime};

/// Resolves [`ScriptReadiness`] for a mount generation.
pub struct ReadinessDetector {
    runtime: Arc<dyn ScriptRuntime>,
    state: PanelStateHandle,
    timeout: Duration,
}

impl ReadinessDetector {
    pub fn new(runtime: Arc<dyn ScriptRuntime>, state: PanelStateHandle) -> Self {
        Self {
            runtime,
            state,
            timeout: SCRIPT_LOAD_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Mount-time readiness: `Ready` if the runtime already registered.
    pub fn initial(&self) -> ScriptReadiness {
        ScriptReadiness::initial(self.runtime.is_registered())
    }

    /// Waits for the first decisive signal for `generation`.
    ///
    /// `events` must be subscribed before [`ReadinessDetector::initial`] is
    /// read so that no signal slips between the check and the wait.
    /// `live` carries the live generation (`None` after teardown); the
    /// watcher returns as soon as it stops matching.
    ///
    /// Returns the readiness the watcher observed when it stopped.
    pub async fn watch(
        &self,
        generation: MountGeneration,
        mut events: broadcast::Receiver<ScriptLoadEvent>,
        mut live: watch::Receiver<Option<MountGeneration>>,
    ) -> ScriptReadiness {
        let deadline = time::sleep(self.timeout);
        tokio::pin!(deadline);
        let mut events_open = true;

        loop {
            tokio::select! {
                changed = live.changed() => {
                    if changed.is_err() || *live.borrow() != Some(generation) {
                        tracing::debug!(%generation, "Script watcher stopped");
                        return ScriptReadiness::Pending;
                    }
                }

                event = events.recv(), if events_open => match event {
                    Ok(ScriptLoadEvent::Loaded) => {
                        return self.resolve(generation, ScriptReadiness::Ready, None);
                    }
                    Ok(ScriptLoadEvent::Failed { detail }) => {
                        let message = script_error_message(detail.as_deref());
                        return self.resolve(generation, ScriptReadiness::Error, Some(message));
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Script watcher lagged behind load signals");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        events_open = false;
                    }
                },

                _ = &mut deadline => {
                    if self.runtime.is_registered() {
                        return self.resolve(generation, ScriptReadiness::Ready, None);
                    }
                    tracing::warn!(
                        timeout_ms = self.timeout.as_millis() as u64,
                        "No script load signal before timeout"
                    );
                    let message = script_error_message(Some(SCRIPT_UNAVAILABLE_DETAIL));
                    return self.resolve(generation, ScriptReadiness::Error, Some(message));
                }
            }
        }
    }

    // A load error, explicit or synthesized by the timeout, also ends any
    // initializing wait.
    fn resolve(
        &self,
        generation: MountGeneration,
        target: ScriptReadiness,
        error: Option<String>,
    ) -> ScriptReadiness {
        let applied = self.state.update_if_current(generation, |state| {
            if !state.readiness.advance(target) {
                return state.readiness;
            }
            match &error {
                None => state.errors.apply(ErrorUpdate::new().script(None)),
                Some(message) => {
                    tracing::error!(%generation, error = %message, "Script failed to load");
                    state
                        .errors
                        .apply(ErrorUpdate::new().script(Some(message.clone())).retryable(false));
                    state.initializing = false;
                }
            }
            state.readiness
        });
        applied.unwrap_or(target)
    }
}
