use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while exchanging a message with the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointError {
    /// The request never completed (DNS, connection refused, transport timeout).
    Transport(String),
    /// The endpoint answered with a non-2xx status.
    /// `detail` is the `detail` field of the body, when there was one.
    Status { status: u16, detail: Option<String> },
    /// A 2xx response whose body did not contain a reply.
    MalformedReply(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::Transport(msg) => write!(f, "transport error: {msg}"),
            EndpointError::Status {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {status}: {detail}"),
            EndpointError::Status { status, detail: None } => write!(f, "HTTP {status}"),
            EndpointError::MalformedReply(msg) => write!(f, "malformed reply: {msg}"),
        }
    }
}

impl std::error::Error for EndpointError {}

#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Short name used in logs and the title bar.
    fn name(&self) -> &str;

    /// Send one user message and wait for the single reply.
    async fn send_message(&self, message: &str) -> Result<String, EndpointError>;

    /// Whether the endpoint reports itself healthy. Never fails; unreachable is unhealthy.
    async fn health_check(&self) -> bool {
        true
    }
}
