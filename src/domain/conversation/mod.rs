//! Conversation transcript domain module.
//!
//! Typed view over the embedded widget's thread and the pure extraction
//! rules that turn it into a generated answer.

mod content;
mod extractor;
mod thread;

pub use content::{
    extract_text, ContentBlock, ContentPart, ItemContent, TypedPart, TEXT_PART_TYPE,
};
pub use extractor::{find_answer, AnswerOutcome, ANSWER_PREFIX, TRIGGER_MARKER};
pub use thread::{ConversationThread, ItemRole, ThreadItem};
