//! Independent error slots and their precedence.
//!
//! The panel tracks three failure sources separately so that one source
//! clearing its error never hides another's. Only one message is shown at a
//! time, chosen by the fixed order `script > session > integration`.

use serde::{Deserialize, Serialize};

/// Source of a blocking error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    /// The widget runtime failed to load or never registered.
    Script,
    /// Configuration missing or the credential exchange failed.
    Session,
    /// Reserved for in-session failures.
    Integration,
}

/// Error slots owned by the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    pub script: Option<String>,
    pub session: Option<String>,
    pub integration: Option<String>,
    pub retryable: bool,
}

/// A partial update to [`ErrorState`].
///
/// Only the slots named by the update are touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorUpdate {
    script: Option<Option<String>>,
    session: Option<Option<String>>,
    integration: Option<Option<String>>,
    retryable: Option<bool>,
}

impl ErrorUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, message: Option<String>) -> Self {
        self.script = Some(message);
        self
    }

    pub fn session(mut self, message: Option<String>) -> Self {
        self.session = Some(message);
        self
    }

    pub fn integration(mut self, message: Option<String>) -> Self {
        self.integration = Some(message);
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }
}

/// The single error surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingError {
    pub source: ErrorSource,
    pub message: String,
    pub retryable: bool,
}

impl ErrorState {
    /// Creates the mount-time state with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a partial update.
    pub fn apply(&mut self, update: ErrorUpdate) {
        if let Some(script) = update.script {
            self.script = script;
        }
        if let Some(session) = update.session {
            self.session = session;
        }
        if let Some(integration) = update.integration {
            self.integration = integration;
        }
        if let Some(retryable) = update.retryable {
            self.retryable = retryable;
        }
    }

    /// Resets every slot, as on restart.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the highest-precedence non-empty error.
    pub fn blocking_error(&self) -> Option<BlockingError> {
        let slots = [
            (ErrorSource::Script, &self.script),
            (ErrorSource::Session, &self.session),
            (ErrorSource::Integration, &self.integration),
        ];
        slots.into_iter().find_map(|(source, slot)| {
            slot.as_deref()
                .filter(|message| !message.is_empty())
                .map(|message| BlockingError {
                    source,
                    message: message.to_string(),
                    retryable: self.retryable,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn new_state_has_no_blocking_error() {
        assert_eq!(ErrorState::new().blocking_error(), None);
    }

    #[test]
    fn script_wins_over_session() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().session(msg("session down")));
        errors.apply(ErrorUpdate::new().script(msg("script down")));

        let blocking = errors.blocking_error().unwrap();
        assert_eq!(blocking.source, ErrorSource::Script);
        assert_eq!(blocking.message, "script down");
    }

    #[test]
    fn session_wins_over_integration() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().integration(msg("integration")).session(msg("session")));
        assert_eq!(errors.blocking_error().unwrap().source, ErrorSource::Session);
    }

    #[test]
    fn integration_surfaces_alone() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().integration(msg("integration")));
        assert_eq!(errors.blocking_error().unwrap().message, "integration");
    }

    #[test]
    fn partial_update_leaves_other_slots() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().script(msg("a")).session(msg("b")).retryable(true));
        errors.apply(ErrorUpdate::new().session(None));

        assert_eq!(errors.script.as_deref(), Some("a"));
        assert_eq!(errors.session, None);
        assert!(errors.retryable);
    }

    #[test]
    fn empty_messages_do_not_block() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().script(msg("")).session(msg("real")));
        assert_eq!(errors.blocking_error().unwrap().source, ErrorSource::Session);
    }

    #[test]
    fn blocking_error_carries_retryable_flag() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().session(msg("x")).retryable(true));
        assert!(errors.blocking_error().unwrap().retryable);
    }

    #[test]
    fn reset_clears_everything() {
        let mut errors = ErrorState::new();
        errors.apply(ErrorUpdate::new().script(msg("a")).retryable(true));
        errors.reset();
        assert_eq!(errors, ErrorState::new());
    }
}
