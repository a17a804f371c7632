//! UI-facing status derived from error slots and the initializing flag.

use serde::{Deserialize, Serialize};

use super::error_state::{BlockingError, ErrorState};

/// Neutral message shown while the first credential is being obtained.
pub const LOADING_MESSAGE: &str = "Loading assistant session...";

/// Label of the restart action.
pub const RESTART_LABEL: &str = "Restart chat";

/// What the full-surface overlay shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    /// No overlay; the widget is interactive.
    Hidden,
    /// Session still initializing. No action offered.
    Loading { message: String },
    /// A blocking error. `restart_label` is set only when the error is retryable.
    Blocked {
        message: String,
        restart_label: Option<String>,
    },
}

/// Merged view of the independent failure sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelStatus {
    pub blocking_error: Option<BlockingError>,
    pub initializing: bool,
}

impl PanelStatus {
    /// Merges the error slots with the initializing flag.
    pub fn derive(errors: &ErrorState, initializing: bool) -> Self {
        Self {
            blocking_error: errors.blocking_error(),
            initializing,
        }
    }

    /// True when the widget may be shown and interacted with.
    pub fn is_usable(&self) -> bool {
        self.blocking_error.is_none() && !self.initializing
    }

    /// True when a restart should be offered.
    pub fn restart_available(&self) -> bool {
        self.blocking_error.as_ref().is_some_and(|e| e.retryable)
    }

    /// The overlay for this status. Errors take precedence over loading.
    pub fn overlay(&self) -> Overlay {
        match (&self.blocking_error, self.initializing) {
            (Some(error), _) => Overlay::Blocked {
                message: error.message.clone(),
                restart_label: error.retryable.then(|| RESTART_LABEL.to_string()),
            },
            (None, true) => Overlay::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            (None, false) => Overlay::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::ErrorUpdate;

    fn errors(update: ErrorUpdate) -> ErrorState {
        let mut state = ErrorState::new();
        state.apply(update);
        state
    }

    #[test]
    fn usable_when_clear_and_initialized() {
        let status = PanelStatus::derive(&ErrorState::new(), false);
        assert!(status.is_usable());
        assert_eq!(status.overlay(), Overlay::Hidden);
    }

    #[test]
    fn initializing_shows_loading_without_action() {
        let status = PanelStatus::derive(&ErrorState::new(), true);
        assert!(!status.is_usable());
        assert_eq!(
            status.overlay(),
            Overlay::Loading {
                message: LOADING_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn error_overrides_loading() {
        let state = errors(ErrorUpdate::new().session(Some("bad".into())));
        let status = PanelStatus::derive(&state, true);
        assert_eq!(
            status.overlay(),
            Overlay::Blocked {
                message: "bad".to_string(),
                restart_label: None
            }
        );
        assert!(!status.restart_available());
    }

    #[test]
    fn script_message_surfaces_over_session() {
        let state = errors(
            ErrorUpdate::new()
                .script(Some("script".into()))
                .session(Some("session".into())),
        );
        let status = PanelStatus::derive(&state, false);
        assert_eq!(status.blocking_error.unwrap().message, "script");
    }

    #[test]
    fn retryable_error_offers_restart() {
        let state = errors(
            ErrorUpdate::new()
                .integration(Some("lost".into()))
                .retryable(true),
        );
        let status = PanelStatus::derive(&state, false);
        assert!(status.restart_available());
        assert_eq!(
            status.overlay(),
            Overlay::Blocked {
                message: "lost".to_string(),
                restart_label: Some(RESTART_LABEL.to_string())
            }
        );
    }

    #[test]
    fn retryable_without_error_offers_nothing() {
        let state = errors(ErrorUpdate::new().retryable(true));
        assert!(!PanelStatus::derive(&state, false).restart_available());
    }
}
