//! Panel controller.
//!
//! Owns the panel state and wires the drivers together: the readiness
//! detector and session bootstrapper run independently at mount, and the
//! capture schedule runs when the widget reports the end of a response
//! while an answer is pending.
//!
//! # Example
//!
//! ```ignore
//! let controller = PanelController::new(ports, PanelSettings::new("wf_123", page));
//! controller.mount();
//!
//! let credential = controller.obtain_credential(None).await?;
//! controller.generate_answer().await?;
//! // ... widget finishes its turn
//! controller.on_response_end().await;
//! controller.save_answer().await?;
//! ```

use std::future::ready;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::error::PanelError;
use super::readiness_detector::ReadinessDetector;
use super::retry::{Attempt, RetryOutcome, RetrySchedule};
use super::session_bootstrap::SessionBootstrapper;
use super::state::PanelStateHandle;
use crate::config::{AppConfig, ValidationError as ConfigValidationError};
use crate::domain::conversation::{find_answer, AnswerOutcome};
use crate::domain::foundation::{GenerationCycle, MountGeneration};
use crate::domain::panel::{
    AnswerSubmission, BlockingError, ClientToolCall, ClientToolInvocation, ClientToolResult,
    ErrorUpdate, FactAction, Overlay, PageContext, ScriptReadiness, GENERATE_ANSWER_PROMPT,
    GENERATION_FAILED_MESSAGE, SCRIPT_LOAD_TIMEOUT,
};
use crate::domain::session::{SessionCredential, SessionError};
use crate::ports::{AnswerStore, ChatWidget, PanelHost, ScriptRuntime, ScriptSignals, SessionGateway};

/// External collaborators of the panel.
#[derive(Clone)]
pub struct PanelPorts {
    pub widget: Arc<dyn ChatWidget>,
    pub runtime: Arc<dyn ScriptRuntime>,
    pub signals: ScriptSignals,
    pub sessions: Arc<dyn SessionGateway>,
    pub answers: Arc<dyn AnswerStore>,
    pub host: Arc<dyn PanelHost>,
}

/// Per-page settings.
#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub workflow_id: String,
    pub page: PageContext,
    pub script_load_timeout: Duration,
    pub capture_schedule: RetrySchedule,
}

impl PanelSettings {
    pub fn new(workflow_id: impl Into<String>, page: PageContext) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            page,
            script_load_timeout: SCRIPT_LOAD_TIMEOUT,
            capture_schedule: RetrySchedule::default(),
        }
    }

    /// Builds settings from loaded configuration and the page's context.
    pub fn from_config(config: &AppConfig, page: PageContext) -> Result<Self, ConfigValidationError> {
        Ok(Self {
            workflow_id: config.panel.workflow_id.clone(),
            page,
            script_load_timeout: config.timing.script_load_timeout(),
            capture_schedule: RetrySchedule::new(config.timing.capture_delays()?),
        })
    }
}

/// How one capture attempt concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The answer was extracted and stored.
    Captured(String),
    /// The assistant replied without the answer prefix. Nothing stored.
    NoAnswer,
    /// The latch was released or moved to another cycle before this attempt.
    Stale,
}

/// Read-only snapshot for the embedding UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub blocking_error: Option<BlockingError>,
    pub overlay: Overlay,
    pub restart_available: bool,
    /// Hidden, not destroyed, while blocked or initializing.
    pub widget_visible: bool,
    /// Changes on restart so the widget remounts cleanly.
    pub widget_key: MountGeneration,
    pub script_readiness: ScriptReadiness,
    pub initializing: bool,
    pub greeting: String,
    pub generated_answer: Option<String>,
    pub answer_pending: bool,
    pub generating: bool,
    pub saving: bool,
    pub show_answer_controls: bool,
}

pub struct PanelController {
    state: PanelStateHandle,
    ports: PanelPorts,
    settings: PanelSettings,
    bootstrapper: SessionBootstrapper,
    detector: Arc<ReadinessDetector>,
    live: watch::Sender<Option<MountGeneration>>,
}

impl PanelController {
    pub fn new(ports: PanelPorts, settings: PanelSettings) -> Self {
        let state = PanelStateHandle::new();
        let bootstrapper = SessionBootstrapper::new(
            ports.sessions.clone(),
            settings.workflow_id.clone(),
            settings.page.clone(),
            state.clone(),
        );
        let detector = ReadinessDetector::new(ports.runtime.clone(), state.clone())
            .with_timeout(settings.script_load_timeout);
        let (live, _) = watch::channel(None);

        Self {
            state,
            ports,
            settings,
            bootstrapper,
            detector: Arc::new(detector),
            live,
        }
    }

    /// Attaches the panel and starts its first generation.
    ///
    /// Returns the script watcher when the runtime is not registered yet.
    /// Must be called from within a Tokio runtime.
    pub fn mount(&self) -> Option<JoinHandle<ScriptReadiness>> {
        self.start_generation()
    }

    /// Tears the panel down. Later async completions become no-ops.
    pub fn unmount(&self) {
        self.state.update(|s| s.mounted = false);
        self.live.send_replace(None);
        tracing::debug!("Panel unmounted");
    }

    /// Starts a fresh generation: errors, fact cache and readiness reset.
    /// A capture pending from the previous generation is abandoned.
    ///
    /// Does nothing when unmounted. Callers should only offer this when
    /// [`PanelView::restart_available`] is true.
    pub fn restart(&self) -> Option<JoinHandle<ScriptReadiness>> {
        if self.state.live_generation().is_none() {
            return None;
        }
        tracing::info!("Restarting panel");
        self.start_generation()
    }

    fn start_generation(&self) -> Option<JoinHandle<ScriptReadiness>> {
        let events = self.ports.signals.subscribe();
        let readiness = self.detector.initial();
        let workflow_error = self.bootstrapper.workflow().err();

        let generation = self.state.update(|s| {
            s.mounted = true;
            s.generation = s.generation.next();
            s.readiness = readiness;
            s.errors.reset();
            s.facts.clear();
            s.initializing = true;
            s.pending = None;
            s.generating = false;
            if let Some(error) = &workflow_error {
                s.errors.apply(
                    ErrorUpdate::new()
                        .session(Some(error.to_string()))
                        .retryable(error.is_retryable()),
                );
                s.initializing = false;
            }
            s.generation
        });
        self.live.send_replace(Some(generation));

        if let Some(error) = &workflow_error {
            tracing::error!(%generation, error = %error, "ChatKit workflow is not configured");
        }
        tracing::info!(%generation, ?readiness, "Panel generation started");

        readiness.is_pending().then(|| {
            let detector = self.detector.clone();
            let live = self.live.subscribe();
            tokio::spawn(async move { detector.watch(generation, events, live).await })
        })
    }

    /// Credential callback for the widget.
    pub async fn obtain_credential(
        &self,
        current: Option<&SessionCredential>,
    ) -> Result<SessionCredential, SessionError> {
        self.bootstrapper.obtain_credential(current).await
    }

    /// Asks the widget to produce a structured answer.
    ///
    /// Opens a new generation cycle, which invalidates any earlier cycle's
    /// pending capture.
    ///
    /// # Errors
    ///
    /// `NotReady` when the widget is not usable. A send failure releases
    /// the latch, stores the apology text and returns `Widget`.
    pub async fn generate_answer(&self) -> Result<GenerationCycle, PanelError> {
        let cycle = self.state.update(|s| {
            let usable = s.mounted && s.status().is_usable() && s.readiness == ScriptReadiness::Ready;
            if !usable {
                return Err(PanelError::NotReady);
            }
            s.cycle = s.cycle.next();
            s.pending = Some(s.cycle);
            s.generated_answer = None;
            s.generating = true;
            Ok(s.cycle)
        })?;

        tracing::info!(%cycle, "Requesting generated answer");
        if let Err(error) = self.ports.widget.send_user_message(GENERATE_ANSWER_PROMPT).await {
            tracing::error!(%cycle, error = %error, "Failed to send generation prompt");
            self.state
                .update(|s| s.settle(cycle, Some(GENERATION_FAILED_MESSAGE.to_string())));
            return Err(error.into());
        }
        Ok(cycle)
    }

    /// Widget signal: a response finished.
    ///
    /// Forwards to the host first. Then, only if an answer is pending,
    /// runs the capture schedule against the live transcript. Returns
    /// `None` when nothing was pending.
    pub async fn on_response_end(&self) -> Option<RetryOutcome<CaptureOutcome>> {
        self.ports.host.on_response_end();

        let Some(cycle) = self.state.read(|s| s.mounted.then_some(s.pending).flatten()) else {
            tracing::debug!("Response ended with no answer pending");
            return None;
        };

        let outcome = self
            .settings
            .capture_schedule
            .run(|attempt| ready(self.capture_attempt(cycle, attempt)))
            .await;

        if let RetryOutcome::Exhausted { attempts } = outcome {
            if self.state.update(|s| s.settle(cycle, None)) {
                tracing::warn!(%cycle, attempts, "No assistant reply found; giving up on answer");
            }
        }
        Some(outcome)
    }

    fn capture_attempt(&self, cycle: GenerationCycle, attempt: usize) -> Attempt<CaptureOutcome> {
        if !self.state.read(|s| s.is_pending(cycle)) {
            tracing::debug!(%cycle, attempt, "Capture attempt skipped; answer no longer pending");
            return Attempt::Done(CaptureOutcome::Stale);
        }

        let thread = self.ports.widget.current_thread();
        tracing::debug!(
            %cycle,
            attempt,
            items = thread.as_ref().map(|t| t.len()),
            "Inspecting transcript for generated answer"
        );

        match thread.as_ref().map(find_answer).unwrap_or(AnswerOutcome::Inconclusive) {
            AnswerOutcome::Answer(answer) => {
                if self.state.update(|s| s.settle(cycle, Some(answer.clone()))) {
                    tracing::info!(%cycle, attempt, "Captured generated answer");
                    Attempt::Done(CaptureOutcome::Captured(answer))
                } else {
                    Attempt::Done(CaptureOutcome::Stale)
                }
            }
            AnswerOutcome::NotAnAnswer(reply) => {
                self.state.update(|s| s.settle(cycle, None));
                tracing::info!(
                    %cycle,
                    attempt,
                    reply_chars = reply.chars().count(),
                    "Assistant reply lacked the answer prefix"
                );
                Attempt::Done(CaptureOutcome::NoAnswer)
            }
            AnswerOutcome::Inconclusive => Attempt::Retry,
        }
    }

    /// Dismisses the generated answer and cancels any pending capture.
    pub fn close_answer(&self) {
        self.state.update(|s| {
            s.generated_answer = None;
            s.pending = None;
            s.generating = false;
        });
    }

    /// Sends the generated answer to the save action.
    ///
    /// # Errors
    ///
    /// `NoAnswer` when nothing was generated, `Validation` for a blank
    /// answer, `Save` when the store rejects it.
    pub async fn save_answer(&self) -> Result<(), PanelError> {
        let answer = self
            .state
            .read(|s| s.mounted.then(|| s.generated_answer.clone()))
            .ok_or(PanelError::NotReady)?
            .ok_or(PanelError::NoAnswer)?;
        let submission = AnswerSubmission::new(answer, &self.settings.page)?;

        self.state.update(|s| s.saving = true);
        let _saving = self.state.reset_on_drop_while_mounted(|s| s.saving = false);

        match self.ports.answers.save_answer(&submission).await {
            Ok(()) => {
                tracing::info!(question_id = %submission.question_id, "Answer saved");
                self.state.update_if_mounted(|s| {
                    s.generated_answer = None;
                    s.pending = None;
                });
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, "Failed to save answer");
                Err(error.into())
            }
        }
    }

    /// Handles a client tool invocation from the widget.
    ///
    /// New facts are forwarded to the host on a spawned task, so the
    /// result returns without waiting for the host. Must be called from
    /// within a Tokio runtime.
    pub fn handle_client_tool(&self, invocation: &ClientToolInvocation) -> ClientToolResult {
        match invocation.parse() {
            ClientToolCall::SwitchTheme(scheme) => {
                tracing::debug!(?scheme, "Theme change requested");
                self.ports.host.on_theme_request(scheme);
                ClientToolResult::ok()
            }
            ClientToolCall::InvalidTheme => ClientToolResult::failed(),
            ClientToolCall::RecordFact { fact_id, fact_text } => {
                if self.state.update(|s| s.facts.admit(&fact_id)) {
                    let host = Arc::clone(&self.ports.host);
                    let action = FactAction::save(fact_id, &fact_text);
                    tokio::spawn(async move { host.on_fact(action).await });
                } else {
                    tracing::debug!(fact_id = %fact_id, "Fact already recorded");
                }
                ClientToolResult::ok()
            }
            ClientToolCall::Unknown => {
                tracing::debug!(tool = %invocation.name, "Unknown client tool");
                ClientToolResult::failed()
            }
        }
    }

    /// Widget signal: a response started.
    pub fn on_response_start(&self) {
        self.state.update_if_mounted(|s| {
            s.errors
                .apply(ErrorUpdate::new().integration(None).retryable(false))
        });
    }

    /// Widget signal: the conversation changed.
    pub fn on_thread_change(&self) {
        self.state.update(|s| s.facts.clear());
    }

    /// Widget signal: the widget reported an error. Logged only.
    pub fn on_error(&self, message: &str) {
        tracing::error!(error = %message, "ChatKit error");
    }

    pub fn greeting(&self) -> String {
        self.settings.page.greeting()
    }

    pub fn page(&self) -> &PageContext {
        &self.settings.page
    }

    /// Snapshot of everything the embedding UI renders.
    pub fn view(&self) -> PanelView {
        self.state.read(|s| {
            let status = s.status();
            PanelView {
                overlay: status.overlay(),
                restart_available: status.restart_available(),
                widget_visible: status.is_usable(),
                blocking_error: status.blocking_error.clone(),
                widget_key: s.generation,
                script_readiness: s.readiness,
                initializing: s.initializing,
                greeting: self.settings.page.greeting(),
                generated_answer: s.generated_answer.clone(),
                answer_pending: s.pending.is_some(),
                generating: s.generating,
                saving: s.saving,
                show_answer_controls: self.settings.page.show_generate_answer_button
                    && status.is_usable(),
            }
        })
    }
}
