//! Agent Gateway port - bridge to the external conversational-agent
//! runtime.
//!
//! The runtime is treated as an opaque capability: given an agent kind, a
//! session id, and a text prompt, it returns reply text or fails. Each
//! agent kind maps to a distinct backend agent identity via configuration.
//! Replies may arrive chunked; implementations must concatenate all content
//! chunks in delivery order before returning.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::AgentKind;
use crate::domain::foundation::{ChatSessionId, DomainError};

/// Port for dispatching a single conversation turn to a backend agent.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Sends `text` to the agent backing `agent_kind`, continuing the
    /// runtime-side conversation identified by `session_id`.
    async fn invoke(
        &self,
        agent_kind: AgentKind,
        session_id: ChatSessionId,
        text: &str,
    ) -> Result<String, AgentGatewayError>;
}

/// Agent delivery errors.
#[derive(Debug, Clone, Error)]
pub enum AgentGatewayError {
    /// The call succeeded but produced no completion content.
    #[error("agent returned no completion content")]
    EmptyCompletion,

    /// No agent identity configured for this kind.
    #[error("no agent configured for kind {0}")]
    UnknownAgent(AgentKind),

    /// The runtime rejected the request.
    #[error("agent request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Network failure reaching the runtime.
    #[error("network error: {0}")]
    Network(String),
}

impl AgentGatewayError {
    /// Creates an upstream rejection error.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

impl From<AgentGatewayError> for DomainError {
    fn from(err: AgentGatewayError) -> Self {
        DomainError::agent(err.to_string())
    }
}
