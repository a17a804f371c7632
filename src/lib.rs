//! ChatKit Panel - Controller for an embedded conversational widget
//!
//! This crate drives a third-party chat widget embedded in a host page:
//! it bootstraps the widget's session and reports load and session errors
//! by precedence, and it can ask the conversation for a structured answer,
//! capture it from the live transcript and hand it to a save action.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
