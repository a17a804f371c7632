//! Panel domain module.
//!
//! Pure state for the embedded-widget panel: error slots and their
//! precedence, script readiness, page context, client tools, and
//! generated answers. The application layer owns the mutable instance.

mod answer;
mod client_tools;
mod error_state;
mod page_context;
mod readiness;
mod status;

pub use answer::{AnswerSubmission, GENERATE_ANSWER_PROMPT, GENERATION_FAILED_MESSAGE};
pub use client_tools::{
    collapse_whitespace, ClientToolCall, ClientToolInvocation, ClientToolResult, ColorScheme,
    FactAction, FactRegistry, RECORD_FACT_TOOL, SWITCH_THEME_TOOL,
};
pub use error_state::{BlockingError, ErrorSource, ErrorState, ErrorUpdate};
pub use page_context::{PageContext, DEFAULT_GREETING};
pub use readiness::{
    script_error_message, ScriptReadiness, SCRIPT_LOAD_TIMEOUT, SCRIPT_UNAVAILABLE_DETAIL,
    UNKNOWN_SCRIPT_ERROR,
};
pub use status::{Overlay, PanelStatus, LOADING_MESSAGE, RESTART_LABEL};
