//! Content shapes carried by thread items.
//!
//! The widget hands us loosely-shaped JSON: a bare string, a single
//! content object, or a list of typed parts. Each shape is a variant of
//! [`ItemContent`], and [`ItemContent::extract_text`] is a total match over
//! them, so no runtime probing is needed and extraction never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Part type that carries user-visible text.
pub const TEXT_PART_TYPE: &str = "text";

/// Content of a single thread item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemContent {
    /// Plain string content.
    Text(String),
    /// Ordered sequence of content parts.
    Parts(Vec<ContentPart>),
    /// A single content object with `text` and/or nested `content`.
    Block(ContentBlock),
    /// Anything else (numbers, booleans). Extracts to nothing.
    Opaque(Value),
}

/// A single content object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Text payload; scalars other than strings are stringified on extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    /// Nested content, used when `text` is absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<ItemContent>>,
}

/// One element of a parts sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    /// An object part, optionally typed.
    Typed(TypedPart),
    /// A non-object element. Never contributes text.
    Opaque(Value),
}

/// An object inside a parts sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedPart {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<ItemContent>>,
}

impl ItemContent {
    /// Creates plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a parts sequence made of `"text"` parts.
    pub fn text_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Parts(
            parts
                .into_iter()
                .map(|text| ContentPart::Typed(TypedPart::text(text)))
                .collect(),
        )
    }

    /// Extracts the trimmed visible text of this content.
    pub fn extract_text(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::text_fragment)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
            Self::Block(block) => block.extract_text(),
            Self::Opaque(_) => String::new(),
        }
    }
}

impl From<&str> for ItemContent {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for ItemContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl ContentBlock {
    fn extract_text(&self) -> String {
        if let Some(text) = self.text.as_ref().and_then(stringify_scalar) {
            return text.trim().to_string();
        }
        match &self.content {
            Some(nested) => nested.extract_text(),
            None => String::new(),
        }
    }
}

impl TypedPart {
    /// Creates a `"text"` part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some(TEXT_PART_TYPE.to_string()),
            text: Some(text.into()),
            content: None,
        }
    }
}

impl ContentPart {
    /// Returns the raw text of a `"text"` part, or `None` for any other part.
    ///
    /// A text part with an empty `text` falls back to its `content` when that
    /// is a plain string, and to the empty string otherwise.
    fn text_fragment(&self) -> Option<&str> {
        let Self::Typed(part) = self else {
            return None;
        };
        if part.kind.as_deref() != Some(TEXT_PART_TYPE) {
            return None;
        }
        let fragment = match (&part.text, part.content.as_deref()) {
            (Some(text), _) if !text.is_empty() => text.as_str(),
            (_, Some(ItemContent::Text(text))) => text.as_str(),
            _ => "",
        };
        Some(fragment)
    }
}

/// Stringifies a scalar JSON value that counts as "present".
///
/// Null, empty strings, `false` and zero are treated as absent.
fn stringify_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Extracts text from optional content. Absent content yields an empty string.
pub fn extract_text(content: Option<&ItemContent>) -> String {
    content.map(ItemContent::extract_text).unwrap_or_default()
}
