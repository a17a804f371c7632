//! In-memory chat widget for testing.
//!
//! Records sent messages into its own transcript and lets tests append
//! assistant replies at any time, mimicking a transcript that catches up
//! after the widget signals completion.
//!
//! # Panics
//!
//! Methods panic if an internal lock is poisoned. This adapter is meant
//! for tests and local demos only.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::conversation::{ConversationThread, ThreadItem};
use crate::ports::{ChatWidget, WidgetError};

/// Chat widget backed by an in-memory transcript.
#[derive(Debug, Default)]
pub struct InMemoryChatWidget {
    thread: Mutex<Option<ConversationThread>>,
    sent: Mutex<Vec<String>>,
    replies: Mutex<VecDeque<ThreadItem>>,
    send_error: Mutex<Option<WidgetError>>,
}

impl InMemoryChatWidget {
    /// Creates a widget with an empty, readable transcript.
    pub fn new() -> Self {
        Self {
            thread: Mutex::new(Some(ConversationThread::default())),
            ..Default::default()
        }
    }

    /// Creates a widget that does not expose a transcript.
    pub fn without_thread() -> Self {
        Self::default()
    }

    /// Queues an item appended right after the next sent message.
    pub fn with_reply_on_send(self, item: ThreadItem) -> Self {
        self.replies.lock().expect("widget replies lock poisoned").push_back(item);
        self
    }

    /// Makes every send fail with `error`.
    pub fn with_send_error(self, error: WidgetError) -> Self {
        *self.send_error.lock().expect("widget error lock poisoned") = Some(error);
        self
    }

    /// Appends an item to the transcript, creating it if needed.
    pub fn push_item(&self, item: ThreadItem) {
        self.thread
            .lock()
            .expect("widget thread lock poisoned")
            .get_or_insert_with(ConversationThread::default)
            .push(item);
    }

    /// Messages sent through [`ChatWidget::send_user_message`].
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().expect("widget sent lock poisoned").clone()
    }
}

#[async_trait]
impl ChatWidget for InMemoryChatWidget {
    async fn send_user_message(&self, text: &str) -> Result<(), WidgetError> {
        if let Some(error) = self.send_error.lock().expect("widget error lock poisoned").clone() {
            return Err(error);
        }
        self.sent
            .lock()
            .expect("widget sent lock poisoned")
            .push(text.to_string());
        self.push_item(ThreadItem::user(text));

        let reply = self
            .replies
            .lock()
            .expect("widget replies lock poisoned")
            .pop_front();
        if let Some(item) = reply {
            self.push_item(item);
        }
        Ok(())
    }

    fn current_thread(&self) -> Option<ConversationThread> {
        self.thread.lock().expect("widget thread lock poisoned").clone()
    }
}
