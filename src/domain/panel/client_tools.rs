//! Client-side tools the widget may invoke.
//!
//! The conversational engine can ask the page to switch theme or to
//! record a fact about the user. Invocations arrive as a name plus loose
//! JSON parameters and are parsed into [`ClientToolCall`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const SWITCH_THEME_TOOL: &str = "switch_theme";
pub const RECORD_FACT_TOOL: &str = "record_fact";

/// Page color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// Parses the two accepted literal values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Raw invocation received from the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientToolInvocation {
    pub name: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ClientToolInvocation {
    pub fn new(name: impl Into<String>, params: Value) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            name: name.into(),
            params,
        }
    }

    /// Interprets the invocation.
    pub fn parse(&self) -> ClientToolCall {
        match self.name.as_str() {
            SWITCH_THEME_TOOL => match self.params.get("theme").and_then(Value::as_str) {
                Some(theme) => match ColorScheme::parse(theme) {
                    Some(scheme) => ClientToolCall::SwitchTheme(scheme),
                    None => ClientToolCall::InvalidTheme,
                },
                None => ClientToolCall::InvalidTheme,
            },
            RECORD_FACT_TOOL => ClientToolCall::RecordFact {
                fact_id: self.string_param("fact_id"),
                fact_text: self.string_param("fact_text"),
            },
            _ => ClientToolCall::Unknown,
        }
    }

    /// Stringifies a parameter; absent or null becomes the empty string.
    fn string_param(&self, key: &str) -> String {
        match self.params.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Parsed client tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientToolCall {
    SwitchTheme(ColorScheme),
    /// `switch_theme` with a missing or unsupported theme.
    InvalidTheme,
    RecordFact { fact_id: String, fact_text: String },
    Unknown,
}

/// Structured result returned to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientToolResult {
    pub success: bool,
}

impl ClientToolResult {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

/// A fact forwarded to the host for saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactAction {
    pub fact_id: String,
    pub fact_text: String,
}

impl FactAction {
    /// Creates a save action, collapsing whitespace runs in the text.
    pub fn save(fact_id: impl Into<String>, fact_text: &str) -> Self {
        Self {
            fact_id: fact_id.into(),
            fact_text: collapse_whitespace(fact_text),
        }
    }
}

/// Ids of facts already forwarded during the current conversation.
#[derive(Debug, Clone, Default)]
pub struct FactRegistry {
    seen: HashSet<String>,
}

impl FactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fact_id`, returning false if it is empty or already seen.
    pub fn admit(&mut self, fact_id: &str) -> bool {
        !fact_id.is_empty() && self.seen.insert(fact_id.to_string())
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Replaces every whitespace run with one space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
