//! Session Gateway Port - Interface for the credential exchange.
//!
//! The widget asks the page for a client secret on first mount and on
//! every refresh. Implementations post the workflow id and page context
//! to the exchange endpoint and return the secret.

use async_trait::async_trait;

use crate::domain::session::{SessionCredential, SessionError, SessionRequest};

/// Port for exchanging configuration and page context for a credential.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Performs one exchange.
    ///
    /// # Errors
    ///
    /// - `SessionError::Exchange` on a non-success status, carrying the
    ///   most specific message found in the body
    /// - `SessionError::MissingClientSecret` when the body lacks `client_secret`
    /// - `SessionError::Transport` when no response was received
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<SessionCredential, SessionError>;
}
