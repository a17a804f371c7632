//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the panel to external systems:
//! - `http_client` - reqwest clients for the credential exchange and save action
//! - `widget` - In-memory chat widget
//! - `script` - Settable script runtime probe
//! - `session` - Mock credential exchange
//! - `answers` - Mock answer store
//! - `host` - Recording host callbacks

pub mod answers;
pub mod host;
pub mod http_client;
pub mod script;
pub mod session;
pub mod widget;

pub use answers::MockAnswerStore;
pub use host::RecordingHost;
pub use http_client::{HttpAnswerStore, HttpSessionGateway};
pub use script::StaticScriptRuntime;
pub use session::MockSessionGateway;
pub use widget::InMemoryChatWidget;
