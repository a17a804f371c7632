//! Domain layer containing the panel's pure types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (counters, errors, state machine trait)
//! - `conversation` - Transcript model and answer extraction
//! - `panel` - Error slots, readiness, page context, client tools, answers
//! - `session` - Workflow configuration and credential exchange types

pub mod conversation;
pub mod foundation;
pub mod panel;
pub mod session;
