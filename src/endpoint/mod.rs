//! # Remote Endpoint
//!
//! The only network boundary: one request per user turn, one reply back.
//! [`Endpoint`] is the seam; [`HttpEndpoint`] is the production implementation.

pub mod http;
pub mod remote;
pub mod types;

pub use http::HttpEndpoint;
pub use remote::{Endpoint, EndpointError};
