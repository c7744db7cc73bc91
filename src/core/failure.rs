//! Maps endpoint failures to the notice the user sees.
//!
//! Checked in order: transport, server fault (5xx), bad request format
//! (400 / 422), then everything else. For unclassified failures the
//! endpoint's own `detail` is shown verbatim when it sent one.

use crate::endpoint::EndpointError;

pub const CONNECTION_MESSAGE: &str =
    "Connection error. Please check your network connection and try again.";
pub const SERVER_MESSAGE: &str = "Server error. Please try again in a moment.";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid message format. Please try rephrasing.";
pub const GENERIC_MESSAGE: &str = "Sorry, I'm having trouble responding right now. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Server,
    InvalidFormat,
    Unclassified { detail: Option<String> },
}

pub fn classify(err: &EndpointError) -> FailureKind {
    match err {
        EndpointError::Transport(_) => FailureKind::Connection,
        EndpointError::Status { status, .. } if (500..600).contains(status) => FailureKind::Server,
        EndpointError::Status {
            status: 400 | 422, ..
        } => FailureKind::InvalidFormat,
        EndpointError::Status { detail, .. } => FailureKind::Unclassified {
            detail: detail.clone().filter(|d| !d.trim().is_empty()),
        },
        EndpointError::MalformedReply(_) => FailureKind::Unclassified { detail: None },
    }
}

impl FailureKind {
    pub fn message(&self) -> &str {
        match self {
            FailureKind::Connection => CONNECTION_MESSAGE,
            FailureKind::Server => SERVER_MESSAGE,
            FailureKind::InvalidFormat => INVALID_FORMAT_MESSAGE,
            FailureKind::Unclassified {
                detail: Some(detail),
            } => detail.as_str(),
            FailureKind::Unclassified { detail: None } => GENERIC_MESSAGE,
        }
    }
}
