//! Answer store adapters.

mod mock_store;

pub use mock_store::MockAnswerStore;
