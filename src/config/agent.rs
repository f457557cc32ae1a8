//! Agent runtime configuration
//!
//! Each agent kind maps to a distinct backend agent identity (an agent id
//! plus an alias id), mirroring how the runtime addresses its deployed
//! agents.

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::chat::AgentKind;

use super::error::ValidationError;

/// Identity of one deployed backend agent.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AgentIdentity {
    /// Agent id in the runtime.
    #[serde(default)]
    pub agent_id: String,

    /// Deployed alias id.
    #[serde(default)]
    pub alias_id: String,
}

impl AgentIdentity {
    fn is_configured(&self) -> bool {
        !self.agent_id.is_empty() && !self.alias_id.is_empty()
    }
}

/// Agent runtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRuntimeConfig {
    /// Base URL of the agent runtime endpoint.
    pub base_url: String,

    /// API key for the runtime, if it requires one.
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Risk-assessment agent identity.
    #[serde(default)]
    pub risk: AgentIdentity,

    /// Product Q&A agent identity.
    #[serde(default)]
    pub product: AgentIdentity,

    /// Delivery status agent identity.
    #[serde(default)]
    pub delivery: AgentIdentity,

    /// Refund agent identity.
    #[serde(default)]
    pub refund: AgentIdentity,

    /// Complaint agent identity.
    #[serde(default)]
    pub complaint: AgentIdentity,
}

impl AgentRuntimeConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Looks up the identity for an agent kind.
    pub fn identity_for(&self, kind: AgentKind) -> &AgentIdentity {
        match kind {
            AgentKind::Risk => &self.risk,
            AgentKind::Product => &self.product,
            AgentKind::Delivery => &self.delivery,
            AgentKind::Refund => &self.refund,
            AgentKind::Complaint => &self.complaint,
        }
    }

    /// Validate agent runtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAgentRuntimeUrl);
        }
        if !self.risk.is_configured() {
            return Err(ValidationError::MissingAgentIdentity("RISK"));
        }
        if !self.product.is_configured() {
            return Err(ValidationError::MissingAgentIdentity("PRODUCT"));
        }
        if !self.delivery.is_configured() {
            return Err(ValidationError::MissingAgentIdentity("DELIVERY"));
        }
        if !self.refund.is_configured() {
            return Err(ValidationError::MissingAgentIdentity("REFUND"));
        }
        if !self.complaint.is_configured() {
            return Err(ValidationError::MissingAgentIdentity("COMPLAINT"));
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    60
}
