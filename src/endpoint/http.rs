//! HTTP endpoint: one JSON POST per turn.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::endpoint::types::{ChatReply, ChatRequest, ErrorBody, HealthStatus};
use crate::endpoint::{Endpoint, EndpointError};

/// Path the chat request is posted to, relative to the base URL.
pub const CHAT_PATH: &str = "/chat";
pub const HEALTH_PATH: &str = "/health";

/// Remote endpoint reached over HTTP with `reqwest`.
pub struct HttpEndpoint {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEndpoint {
    /// `timeout` is applied by the transport. `None` leaves reqwest's default (no deadline).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, EndpointError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: normalize_base_url(&base_url.into()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Drop trailing slashes so paths can be appended directly.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[async_trait]
impl Endpoint for HttpEndpoint {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn send_message(&self, message: &str) -> Result<String, EndpointError> {
        let url = format!("{}{}", self.base_url, CHAT_PATH);
        info!("POST {} (message_len={})", url, message.chars().count());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("Endpoint response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ErrorBody::parse(&body).detail;
            warn!("Endpoint error: {} - {:?}", status.as_u16(), detail);
            return Err(EndpointError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;
        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| {
            warn!("Unparseable reply body ({} bytes): {}", body.len(), e);
            EndpointError::MalformedReply(e.to_string())
        })?;

        debug!("Reply received ({} chars)", reply.reply.chars().count());
        Ok(reply.reply)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        let response = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                info!("Health check returned HTTP {}", response.status().as_u16());
                return false;
            }
            Err(e) => {
                info!("Health check failed: {}", e);
                return false;
            }
        };

        match response.json::<HealthStatus>().await {
            Ok(health) => health.is_healthy(),
            Err(e) => {
                info!("Health check body unreadable: {}", e);
                false
            }
        }
    }
}
