//! Adapters - Implementations of port interfaces.
//!
//! - `http` - Transports for the Platform API (reqwest, mock)

pub mod http;

pub use http::{MockTransport, ReqwestTransport};
