//! Errors returned by panel operations.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::session::SessionError;
use crate::ports::{SaveAnswerError, WidgetError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// A blocking error is showing, the session is still initializing,
    /// or the widget runtime has not loaded.
    #[error("The assistant is not ready")]
    NotReady,

    #[error("There is no generated answer to save")]
    NoAnswer,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Save(#[from] SaveAnswerError),
}
