//! Read-only view over the widget's conversation transcript.

use serde::{Deserialize, Serialize};

use super::content::{extract_text, ItemContent};

/// Role of a thread item's author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRole {
    /// Message typed (or sent programmatically) on the user's behalf.
    User,
    /// Reply produced by the assistant.
    Assistant,
    /// Widgets, tool calls, and anything else the widget records.
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of a conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub role: ItemRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ItemContent>,
}

impl ThreadItem {
    /// Creates an item with the given role and content.
    pub fn new(role: ItemRole, content: impl Into<ItemContent>) -> Self {
        Self {
            id: None,
            role,
            content: Some(content.into()),
        }
    }

    /// Creates a user item.
    pub fn user(content: impl Into<ItemContent>) -> Self {
        Self::new(ItemRole::User, content)
    }

    /// Creates an assistant item.
    pub fn assistant(content: impl Into<ItemContent>) -> Self {
        Self::new(ItemRole::Assistant, content)
    }

    /// Sets the item id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the trimmed visible text of this item.
    pub fn text(&self) -> String {
        extract_text(self.content.as_ref())
    }

    pub fn is_user(&self) -> bool {
        self.role == ItemRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == ItemRole::Assistant
    }
}

/// A conversation thread: items in causal order, oldest first.
///
/// Items are only ever appended during a generation cycle, so an index
/// observed in one snapshot still designates the same item in a later one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationThread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<ThreadItem>,
}

impl ConversationThread {
    /// Creates a thread from items.
    pub fn new(items: Vec<ThreadItem>) -> Self {
        Self { id: None, items }
    }

    /// Appends an item.
    pub fn push(&mut self, item: ThreadItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[ThreadItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
