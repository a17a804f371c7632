//! HTTP client adapters for the credential exchange and the save action.

mod answer_client;
mod error_detail;
mod session_client;

pub use answer_client::HttpAnswerStore;
pub use error_detail::extract_error_detail;
pub use session_client::HttpSessionGateway;
