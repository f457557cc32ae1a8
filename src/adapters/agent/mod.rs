//! Agent Gateway adapters.

mod http_gateway;
mod mock;

pub use http_gateway::HttpAgentGateway;
pub use mock::{MockAgentGateway, RecordedInvocation};
