//! Foundation module - Shared domain primitives.
//!
//! Counters, error types, and the state machine trait used across the
//! panel domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{GenerationCycle, MountGeneration};
pub use state_machine::StateMachine;
