//! Session domain module.
//!
//! Workflow configuration, the credential exchange request, the
//! credential itself, and the errors the exchange can raise.

mod credential;
mod errors;
mod request;

pub use credential::SessionCredential;
pub use errors::{SessionError, SESSION_START_FAILED, WORKFLOW_NOT_CONFIGURED};
pub use request::{
    ChatkitConfiguration, FileUpload, SessionRequest, SessionRequestBody, WorkflowId, WorkflowRef,
    PLACEHOLDER_WORKFLOW_PREFIX,
};
