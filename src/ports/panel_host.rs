//! Panel Host Port - Callbacks into the embedding page.

use async_trait::async_trait;

use crate::domain::panel::{ColorScheme, FactAction};

/// Callbacks the embedding page provides to the panel.
#[async_trait]
pub trait PanelHost: Send + Sync {
    /// The assistant finished a response.
    fn on_response_end(&self);

    /// The conversation asked for a different color scheme.
    fn on_theme_request(&self, scheme: ColorScheme);

    /// A new fact should be saved. Failures are the host's concern.
    async fn on_fact(&self, action: FactAction);
}
