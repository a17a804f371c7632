//! Load state of the embedded widget's runtime.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::StateMachine;

/// How long to wait for a load signal before declaring the runtime missing.
pub const SCRIPT_LOAD_TIMEOUT: Duration = Duration::from_millis(5000);

/// Message used when no load signal arrives in time.
pub const SCRIPT_UNAVAILABLE_DETAIL: &str =
    "ChatKit web component is unavailable. Verify that the script URL is reachable.";

/// Detail used when a load error carries no detail of its own.
pub const UNKNOWN_SCRIPT_ERROR: &str = "unknown error";

/// Readiness of the widget runtime for the current mount generation.
///
/// ```text
/// Pending --load complete--> Ready
/// Pending --load error / timeout--> Error
/// ```
///
/// `Ready` and `Error` are terminal until a restart re-derives the
/// initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptReadiness {
    Pending,
    Ready,
    Error,
}

impl ScriptReadiness {
    /// Initial value for a mount: `Ready` if the runtime is already registered.
    pub fn initial(runtime_registered: bool) -> Self {
        if runtime_registered {
            Self::Ready
        } else {
            Self::Pending
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl StateMachine for ScriptReadiness {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Pending => vec![Self::Ready, Self::Error],
            Self::Ready | Self::Error => vec![],
        }
    }
}

/// Formats the message stored in the `script` error slot.
pub fn script_error_message(detail: Option<&str>) -> String {
    format!("Error: {}", detail.unwrap_or(UNKNOWN_SCRIPT_ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_value_follows_registration() {
        assert_eq!(ScriptReadiness::initial(true), ScriptReadiness::Ready);
        assert_eq!(ScriptReadiness::initial(false), ScriptReadiness::Pending);
    }

    #[test]
    fn first_signal_wins() {
        let mut readiness = ScriptReadiness::Pending;
        assert!(readiness.advance(ScriptReadiness::Error));
        assert!(!readiness.advance(ScriptReadiness::Ready));
        assert_eq!(readiness, ScriptReadiness::Error);
    }

    #[test]
    fn ready_and_error_are_terminal() {
        assert!(ScriptReadiness::Ready.is_terminal());
        assert!(ScriptReadiness::Error.is_terminal());
        assert!(!ScriptReadiness::Pending.is_terminal());
    }

    #[test]
    fn pending_cannot_loop_back() {
        assert!(ScriptReadiness::Ready.transition_to(ScriptReadiness::Pending).is_err());
    }

    #[test]
    fn error_message_uses_detail_or_fallback() {
        assert_eq!(script_error_message(Some("404")), "Error: 404");
        assert_eq!(script_error_message(None), "Error: unknown error");
    }
}
