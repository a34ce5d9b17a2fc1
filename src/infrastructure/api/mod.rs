pub mod rest_gateway;
pub mod wire;

pub use rest_gateway::RestGateway;
