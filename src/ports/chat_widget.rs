//! Chat Widget Port - Interface to the embedded conversational widget.
//!
//! The panel never renders or transports messages itself. It only asks
//! the widget to send a user message and reads the widget's transcript.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::ConversationThread;

/// Errors raised by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The widget has not mounted its control surface yet.
    #[error("ChatKit control is not available")]
    Unavailable,

    /// The widget rejected or failed to send the message.
    #[error("Failed to send message: {0}")]
    SendFailed(String),
}

/// Port for driving the embedded widget.
#[async_trait]
pub trait ChatWidget: Send + Sync {
    /// Sends a message as if the user had typed it.
    async fn send_user_message(&self, text: &str) -> Result<(), WidgetError>;

    /// Returns the transcript as it is right now, if the widget exposes one.
    ///
    /// Each call reads a fresh snapshot; later calls may see more items.
    fn current_thread(&self) -> Option<ConversationThread>;
}
