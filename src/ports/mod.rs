//! Ports - Interfaces for external dependencies.
//!
//! - `HttpTransport` - Performs one HTTP round trip for a built request

mod http_transport;

pub use http_transport::{HttpMethod, HttpTransport, OutboundRequest, RawResponse};
