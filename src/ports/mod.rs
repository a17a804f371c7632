//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the panel and the outside world. Adapters implement these ports.
//!
//! - `ChatWidget` - The embedded conversational widget
//! - `ScriptRuntime` / `ScriptSignals` - Widget runtime load state
//! - `SessionGateway` - Credential exchange endpoint
//! - `AnswerStore` - Save action for generated answers
//! - `PanelHost` - Callbacks into the embedding page

mod answer_store;
mod chat_widget;
mod panel_host;
mod script_runtime;
mod session_gateway;

pub use answer_store::{AnswerStore, SaveAnswerError, SAVE_ANSWER_FAILED};
pub use chat_widget::{ChatWidget, WidgetError};
pub use panel_host::PanelHost;
pub use script_runtime::{ScriptLoadEvent, ScriptRuntime, ScriptSignals};
pub use session_gateway::SessionGateway;
