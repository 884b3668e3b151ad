//! Messaging gateway
//!
//! The request/response surface exposed to UI surfaces and page-injected
//! code. Payloads are closed tagged variants validated at the boundary;
//! malformed or unknown requests get a structured error response instead
//! of silence.

mod gateway;
mod types;

pub use gateway::MessageGateway;
pub use types::{GatewayRequest, GatewayResponse};
