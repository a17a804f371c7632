//! Credential exchange request.

use serde::Serialize;

use super::errors::SessionError;
use crate::domain::panel::PageContext;

/// Prefix of the placeholder workflow id shipped in templates.
pub const PLACEHOLDER_WORKFLOW_PREFIX: &str = "wf_replace";

/// A configured workflow id: non-empty and not the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkflowId(String);

impl WorkflowId {
    /// Validates a raw workflow id, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(PLACEHOLDER_WORKFLOW_PREFIX) {
            return Err(SessionError::NotConfigured);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything needed to ask for a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub workflow_id: WorkflowId,
    pub page: PageContext,
}

/// JSON body of the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequestBody<'a> {
    pub workflow: WorkflowRef<'a>,
    pub question_template_id: &'a str,
    pub chatkit_configuration: ChatkitConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatkitConfiguration {
    pub file_upload: FileUpload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileUpload {
    pub enabled: bool,
}

impl SessionRequest {
    pub fn new(workflow_id: WorkflowId, page: PageContext) -> Self {
        Self { workflow_id, page }
    }

    /// Query parameters appended to the exchange URL.
    pub fn query_pairs(&self) -> [(&'static str, &str); 6] {
        self.page.session_query_pairs()
    }

    /// Request body; attachments stay disabled.
    pub fn body(&self) -> SessionRequestBody<'_> {
        SessionRequestBody {
            workflow: WorkflowRef {
                id: self.workflow_id.as_str(),
            },
            question_template_id: &self.page.question_template_id,
            chatkit_configuration: ChatkitConfiguration::default(),
        }
    }
}
