//! State machine trait for lifecycle enums.
//!
//! Lifecycle values such as script readiness only move forward along a
//! fixed set of edges. Implementors list the edges; the trait supplies
//! checked and "first writer wins" transitions on top of them.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ScriptReadiness {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Pending => vec![Ready, Error],
///             Ready | Error => vec![],
///         }
///     }
/// }
///
/// let mut status = ScriptReadiness::Pending;
/// assert!(status.advance(ScriptReadiness::Ready));
/// assert!(!status.advance(ScriptReadiness::Error));
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if the edge `self -> target` exists.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs a checked transition, returning the new state.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(self, target))
        }
    }

    /// Moves to `target` in place if the edge exists.
    ///
    /// Returns whether the state changed. Signals arriving after a
    /// terminal state has been reached are dropped this way.
    fn advance(&mut self, target: Self) -> bool {
        match self.transition_to(target) {
            Ok(next) => {
                *self = next;
                true
            }
            Err(_) => false,
        }
    }

    /// Checks if the current state is terminal (no outgoing edges).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Upload {
        Queued,
        Sending,
        Sent,
        Failed,
    }

    impl StateMachine for Upload {
        fn valid_transitions(&self) -> Vec<Self> {
            use Upload::*;
            match self {
                Queued => vec![Sending, Failed],
                Sending => vec![Sent, Failed],
                Sent | Failed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_accepts_listed_edge() {
        assert_eq!(Upload::Queued.transition_to(Upload::Sending), Ok(Upload::Sending));
    }

    #[test]
    fn transition_to_rejects_missing_edge() {
        let err = Upload::Queued.transition_to(Upload::Sent).unwrap_err();
        assert_eq!(err.to_string(), "Cannot transition from Queued to Sent");
    }

    #[test]
    fn advance_is_first_writer_wins() {
        let mut status = Upload::Sending;
        assert!(status.advance(Upload::Failed));
        assert!(!status.advance(Upload::Sent));
        assert_eq!(status, Upload::Failed);
    }

    #[test]
    fn terminal_states_have_no_edges() {
        assert!(Upload::Sent.is_terminal());
        assert!(Upload::Failed.is_terminal());
        assert!(!Upload::Queued.is_terminal());
    }
}
