//! Application layer - The panel controller and its drivers.
//!
//! This layer orchestrates domain rules and coordinates between ports:
//! - `ReadinessDetector` - Resolves script readiness per mount generation
//! - `SessionBootstrapper` - Credential exchange with mount-aware writes
//! - `RetrySchedule` - Bounded, timed answer capture
//! - `PanelController` - Owns the state and exposes the widget callbacks

mod error;
mod panel_controller;
mod readiness_detector;
mod retry;
mod session_bootstrap;
mod state;

pub use error::PanelError;
pub use panel_controller::{CaptureOutcome, PanelController, PanelPorts, PanelSettings, PanelView};
pub use readiness_detector::ReadinessDetector;
pub use retry::{Attempt, RetryOutcome, RetrySchedule, DEFAULT_CAPTURE_DELAYS_MS};
pub use session_bootstrap::SessionBootstrapper;
pub use state::{PanelState, PanelStateHandle, ResetOnDrop};
