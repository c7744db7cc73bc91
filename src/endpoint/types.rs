//! Wire types for the chat endpoint.
//!
//! ```text
//! POST /chat    {"message": "..."}  →  2xx {"reply": "..."}
//!                                   →  non-2xx {"detail": "..."} (body optional)
//! GET  /health                      →  {"status": "healthy"}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
}

/// Body of a failed request. Every field is optional; an empty or
/// unparseable body becomes `ErrorBody::default()`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
