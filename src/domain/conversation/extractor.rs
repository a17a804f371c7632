//! Answer extraction from a conversation transcript.
//!
//! After the panel sends the synthetic "generate a comprehensive answer"
//! prompt, the assistant is expected to reply with text starting with
//! `Answer:`. [`find_answer`] locates that reply and classifies the
//! transcript into one of three outcomes:
//!
//! | Outcome | Meaning | Caller action |
//! |---------|---------|---------------|
//! | `Answer` | Prefixed reply with a non-empty body | resolve |
//! | `NotAnAnswer` | Assistant replied without the prefix | stop, surface nothing |
//! | `Inconclusive` | No usable assistant reply yet | poll again |

use super::thread::{ConversationThread, ThreadItem};

/// Marker searched for (case-insensitively) in the trigger message.
pub const TRIGGER_MARKER: &str = "comprehensive answer";

/// Prefix that marks an assistant reply as a generated answer.
pub const ANSWER_PREFIX: &str = "answer:";

/// Result of scanning a transcript for a generated answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer body, prefix removed and trimmed.
    Answer(String),
    /// The assistant replied, but not with an answer.
    NotAnAnswer(String),
    /// No assistant reply with text yet, or a prefixed reply with an empty body.
    Inconclusive,
}

impl AnswerOutcome {
    /// Returns true if polling again could change the outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Inconclusive)
    }
}

/// Scans `thread` for the assistant's reply to the answer prompt.
pub fn find_answer(thread: &ConversationThread) -> AnswerOutcome {
    let texts: Vec<String> = thread.items().iter().map(ThreadItem::text).collect();
    let items = thread.items();

    let trigger = items
        .iter()
        .zip(&texts)
        .rposition(|(item, text)| item.is_user() && text.to_lowercase().contains(TRIGGER_MARKER));

    let last_reply = |after: Option<usize>| {
        items
            .iter()
            .zip(&texts)
            .enumerate()
            .rev()
            .find(|(index, (item, text))| {
                item.is_assistant() && !text.is_empty() && after.map_or(true, |t| *index > t)
            })
            .map(|(_, (_, text))| text.as_str())
    };

    let Some(reply) = last_reply(trigger).or_else(|| last_reply(None)) else {
        return AnswerOutcome::Inconclusive;
    };

    match strip_answer_prefix(reply) {
        Some(body) if !body.is_empty() => AnswerOutcome::Answer(body.to_string()),
        Some(_) => AnswerOutcome::Inconclusive,
        None => AnswerOutcome::NotAnAnswer(reply.to_string()),
    }
}

/// Returns the trimmed remainder if `text` starts with `Answer:` in any case.
fn strip_answer_prefix(text: &str) -> Option<&str> {
    let text = text.trim();
    let head = text.get(..ANSWER_PREFIX.len())?;
    if head.eq_ignore_ascii_case(ANSWER_PREFIX) {
        Some(text[ANSWER_PREFIX.len()..].trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{ItemContent, ItemRole};
    use proptest::prelude::*;

    const PROMPT: &str = "Generate a comprehensive answer for this question based on our conversation.";

    fn thread(items: Vec<ThreadItem>) -> ConversationThread {
        ConversationThread::new(items)
    }

    #[test]
    fn empty_thread_is_inconclusive() {
        assert_eq!(find_answer(&thread(vec![])), AnswerOutcome::Inconclusive);
    }

    #[test]
    fn only_user_items_is_inconclusive() {
        let t = thread(vec![ThreadItem::user("hello"), ThreadItem::user(PROMPT)]);
        assert_eq!(find_answer(&t), AnswerOutcome::Inconclusive);
    }

    #[test]
    fn prefixed_reply_after_trigger_is_answer() {
        let t = thread(vec![
            ThreadItem::user("What is the rule?"),
            ThreadItem::assistant("It depends."),
            ThreadItem::user(PROMPT),
            ThreadItem::assistant(ItemContent::text_parts(["Answer:  The rule applies when X > 0. "])),
        ]);
        assert_eq!(
            find_answer(&t),
            AnswerOutcome::Answer("The rule applies when X > 0.".to_string())
        );
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let t = thread(vec![ThreadItem::assistant("ANSWER: yes")]);
        assert_eq!(find_answer(&t), AnswerOutcome::Answer("yes".to_string()));
    }

    #[test]
    fn unprefixed_reply_is_definitive() {
        let t = thread(vec![
            ThreadItem::user(PROMPT),
            ThreadItem::assistant("I need more details first."),
        ]);
        let outcome = find_answer(&t);
        assert_eq!(
            outcome,
            AnswerOutcome::NotAnAnswer("I need more details first.".to_string())
        );
        assert!(!outcome.is_retryable());
    }

    #[test]
    fn prefix_with_empty_body_is_inconclusive() {
        let t = thread(vec![ThreadItem::user(PROMPT), ThreadItem::assistant("Answer:   ")]);
        assert_eq!(find_answer(&t), AnswerOutcome::Inconclusive);
    }

    #[test]
    fn falls_back_to_earlier_reply_when_none_after_trigger() {
        let t = thread(vec![
            ThreadItem::assistant("Answer: earlier"),
            ThreadItem::user(PROMPT),
        ]);
        assert_eq!(find_answer(&t), AnswerOutcome::Answer("earlier".to_string()));
    }

    #[test]
    fn uses_most_recent_trigger() {
        let t = thread(vec![
            ThreadItem::user(PROMPT),
            ThreadItem::assistant("Answer: first"),
            ThreadItem::user("Give me a comprehensive answer again"),
            ThreadItem::assistant("Answer: second"),
        ]);
        assert_eq!(find_answer(&t), AnswerOutcome::Answer("second".to_string()));
    }

    #[test]
    fn skips_assistant_items_without_text() {
        let t = thread(vec![
            ThreadItem::user(PROMPT),
            ThreadItem::assistant("Answer: real"),
            ThreadItem::assistant(ItemContent::Parts(vec![])),
            ThreadItem {
                id: None,
                role: ItemRole::Assistant,
                content: None,
            },
        ]);
        assert_eq!(find_answer(&t), AnswerOutcome::Answer("real".to_string()));
    }

    #[test]
    fn ignores_other_roles() {
        let t = thread(vec![
            ThreadItem::user(PROMPT),
            ThreadItem::new(ItemRole::Other, "Answer: from a tool"),
        ]);
        assert_eq!(find_answer(&t), AnswerOutcome::Inconclusive);
    }

    #[test]
    fn non_ascii_reply_does_not_panic() {
        let t = thread(vec![ThreadItem::assistant("Ответ: да")]);
        assert_eq!(
            find_answer(&t),
            AnswerOutcome::NotAnAnswer("Ответ: да".to_string())
        );
    }

    proptest! {
        #[test]
        fn trailing_prefixed_reply_yields_its_body(body in "[^\\s].{0,40}[^\\s]|[^\\s]") {
            let t = thread(vec![
                ThreadItem::user(PROMPT),
                ThreadItem::assistant(format!("Answer: {}", body)),
            ]);
            prop_assert_eq!(find_answer(&t), AnswerOutcome::Answer(body.trim().to_string()));
        }

        #[test]
        fn find_answer_never_panics(texts in proptest::collection::vec((any::<bool>(), ".*"), 0..8)) {
            let items = texts
                .into_iter()
                .map(|(assistant, text)| if assistant { ThreadItem::assistant(text) } else { ThreadItem::user(text) })
                .collect();
            let _ = find_answer(&thread(items));
        }
    }
}
