//! Short-lived session credentials.

use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// Client secret authorizing one widget session.
///
/// Wrapped in [`Secret`] so it never appears in logs or debug output.
pub struct SessionCredential(Secret<String>);

impl SessionCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Secret::new(secret.into()))
    }

    /// Exposes the raw secret for handing to the widget.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential([REDACTED])")
    }
}

impl PartialEq for SessionCredential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}
