//! Session gateway adapters.

mod mock_gateway;

pub use mock_gateway::MockSessionGateway;
