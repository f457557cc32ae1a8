//! HTTP Agent Gateway - bridge to the deployed agent runtime.
//!
//! Dispatches a single turn to the agent identity configured for the
//! session's kind and assembles the chunked reply body in delivery order.
//! The runtime streams its completion; this adapter concatenates every
//! chunk before returning, per the gateway contract.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AgentRuntimeConfig;
use crate::domain::chat::AgentKind;
use crate::domain::foundation::ChatSessionId;
use crate::ports::{AgentGateway, AgentGatewayError};

/// Agent runtime gateway over HTTP.
pub struct HttpAgentGateway {
    config: AgentRuntimeConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    input_text: &'a str,
}

impl HttpAgentGateway {
    /// Creates a gateway from runtime configuration.
    pub fn new(config: AgentRuntimeConfig) -> Result<Self, AgentGatewayError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AgentGatewayError::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Builds the invoke URL for one agent identity and session.
    fn invoke_url(&self, kind: AgentKind, session_id: ChatSessionId) -> String {
        let identity = self.config.identity_for(kind);
        format!(
            "{}/agents/{}/aliases/{}/sessions/{}/text",
            self.config.base_url.trim_end_matches('/'),
            identity.agent_id,
            identity.alias_id,
            session_id
        )
    }
}

#[async_trait]
impl AgentGateway for HttpAgentGateway {
    async fn invoke(
        &self,
        agent_kind: AgentKind,
        session_id: ChatSessionId,
        text: &str,
    ) -> Result<String, AgentGatewayError> {
        let identity = self.config.identity_for(agent_kind);
        if identity.agent_id.is_empty() || identity.alias_id.is_empty() {
            return Err(AgentGatewayError::UnknownAgent(agent_kind));
        }

        let url = self.invoke_url(agent_kind, session_id);
        debug!(%agent_kind, %session_id, "dispatching turn to agent runtime");

        let mut request = self
            .client
            .post(&url)
            .json(&InvokeRequest { input_text: text });
        if let Some(api_key) = &self.config.api_key {
            request = request.header("x-api-key", api_key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentGatewayError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%agent_kind, status = status.as_u16(), "agent runtime rejected request");
            return Err(AgentGatewayError::upstream(
                status.as_u16(),
                truncate(&body, 200),
            ));
        }

        // The runtime streams the completion; concatenate every chunk in
        // delivery order before returning.
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AgentGatewayError::network(e.to_string()))?;
            body.extend_from_slice(&chunk);
        }

        let reply = String::from_utf8_lossy(&body).trim().to_string();
        if reply.is_empty() {
            return Err(AgentGatewayError::EmptyCompletion);
        }

        debug!(%agent_kind, %session_id, reply_len = reply.len(), "agent reply assembled");
        Ok(reply)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
