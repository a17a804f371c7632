//! Context read from the host page's query string.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Greeting used when the page names neither a question nor a user.
pub const DEFAULT_GREETING: &str = "How can I help you today?";

/// Query parameters the panel reads from the host page.
///
/// Every field defaults to the empty string when the parameter is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub user_first_name: String,
    pub user_last_name: String,
    pub form_template_uid: String,
    pub user_id: String,
    pub question_template_id: String,
    pub version: String,
    pub question_name: String,
    /// True only for the literal value `"true"`.
    pub show_generate_answer_button: bool,
}

impl PageContext {
    /// Parses a query string, with or without the leading `?`.
    ///
    /// When a parameter repeats, the first non-empty occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut ctx = Self::default();
        let mut show_button: Option<String> = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "user_first_name" => &mut ctx.user_first_name,
                "user_last_name" => &mut ctx.user_last_name,
                "form_template_uid" => &mut ctx.form_template_uid,
                "user_id" => &mut ctx.user_id,
                "question_template_id" => &mut ctx.question_template_id,
                "version" => &mut ctx.version,
                "question_name" => &mut ctx.question_name,
                "show_generate_answer_button" => {
                    if show_button.is_none() {
                        show_button = Some(value.into_owned());
                    }
                    continue;
                }
                _ => continue,
            };
            if slot.is_empty() {
                *slot = value.into_owned();
            }
        }

        ctx.show_generate_answer_button = show_button.as_deref() == Some("true");
        ctx
    }

    /// Parses the query component of a full page URL.
    pub fn from_url(url: &url::Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    /// Parameters forwarded to the credential exchange, in request order.
    pub fn session_query_pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("user_first_name", self.user_first_name.as_str()),
            ("user_last_name", self.user_last_name.as_str()),
            ("form_template_uid", self.form_template_uid.as_str()),
            ("user_id", self.user_id.as_str()),
            ("question_template_id", self.question_template_id.as_str()),
            ("version", self.version.as_str()),
        ]
    }

    /// Start-screen greeting for the widget.
    pub fn greeting(&self) -> String {
        if !self.question_name.is_empty() {
            self.question_name.clone()
        } else if !self.user_first_name.is_empty() {
            format!("Hi {}, how can I help you today?", self.user_first_name)
        } else {
            DEFAULT_GREETING.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_parameters() {
        let ctx = PageContext::from_query(
            "?user_first_name=Ada&user_last_name=Lovelace&form_template_uid=f1&user_id=u9\
             &question_template_id=abc123&version=2&question_name=Rule%20check\
             &show_generate_answer_button=true&ignored=1",
        );
        assert_eq!(ctx.user_first_name, "Ada");
        assert_eq!(ctx.user_last_name, "Lovelace");
        assert_eq!(ctx.form_template_uid, "f1");
        assert_eq!(ctx.user_id, "u9");
        assert_eq!(ctx.question_template_id, "abc123");
        assert_eq!(ctx.version, "2");
        assert_eq!(ctx.question_name, "Rule check");
        assert!(ctx.show_generate_answer_button);
    }

    #[test]
    fn missing_parameters_are_empty() {
        let ctx = PageContext::from_query("");
        assert_eq!(ctx, PageContext::default());
        assert!(!ctx.show_generate_answer_button);
    }

    #[test]
    fn button_flag_requires_literal_true() {
        assert!(!PageContext::from_query("show_generate_answer_button=TRUE").show_generate_answer_button);
        assert!(!PageContext::from_query("show_generate_answer_button=1").show_generate_answer_button);
    }

    #[test]
    fn first_occurrence_wins() {
        let ctx = PageContext::from_query("user_id=first&user_id=second");
        assert_eq!(ctx.user_id, "first");
    }

    #[test]
    fn from_url_reads_query() {
        let url = url::Url::parse("https://host.example/embed?user_id=42").unwrap();
        assert_eq!(PageContext::from_url(&url).user_id, "42");
    }

    #[test]
    fn session_pairs_follow_request_order() {
        let ctx = PageContext::from_query("version=3&user_id=7");
        let pairs = ctx.session_query_pairs();
        assert_eq!(pairs[0], ("user_first_name", ""));
        assert_eq!(pairs[3], ("user_id", "7"));
        assert_eq!(pairs[5], ("version", "3"));
    }

    #[test]
    fn greeting_prefers_question_then_name() {
        assert_eq!(
            PageContext::from_query("question_name=Q1&user_first_name=Ada").greeting(),
            "Q1"
        );
        assert_eq!(
            PageContext::from_query("user_first_name=Ada").greeting(),
            "Hi Ada, how can I help you today?"
        );
        assert_eq!(PageContext::default().greeting(), DEFAULT_GREETING);
    }
}
