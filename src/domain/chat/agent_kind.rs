//! The closed set of specialized conversational backends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which specialized agent handles a conversation.
///
/// Fixed for the lifetime of a session; every dispatch for the session is
/// routed to the backend agent identity this kind maps to. Wire names use
/// the upper-case form the storefront API has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentKind {
    /// Product risk assessment.
    #[default]
    Risk,
    /// Product Q&A.
    Product,
    /// Delivery status help.
    Delivery,
    /// Refund requests (multi-step: captures a reason first).
    Refund,
    /// Complaints (multi-step: captures a description first, accepts images).
    Complaint,
}

impl AgentKind {
    /// Returns true for the kinds that open in structured-capture mode,
    /// waiting for the first free-text reply before contacting the agent.
    pub fn captures_reason(&self) -> bool {
        matches!(self, AgentKind::Refund | AgentKind::Complaint)
    }

    /// Returns true if the kind accepts image attachments mid-conversation.
    pub fn accepts_attachments(&self) -> bool {
        matches!(self, AgentKind::Complaint)
    }

    /// Stable upper-case name, as used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Risk => "RISK",
            AgentKind::Product => "PRODUCT",
            AgentKind::Delivery => "DELIVERY",
            AgentKind::Refund => "REFUND",
            AgentKind::Complaint => "COMPLAINT",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_upper_case_wire_names() {
        assert_eq!(serde_json::to_string(&AgentKind::Risk).unwrap(), "\"RISK\"");
        assert_eq!(
            serde_json::to_string(&AgentKind::Complaint).unwrap(),
            "\"COMPLAINT\""
        );
    }

    #[test]
    fn deserializes_from_upper_case_wire_names() {
        let kind: AgentKind = serde_json::from_str("\"DELIVERY\"").unwrap();
        assert_eq!(kind, AgentKind::Delivery);
    }

    #[test]
    fn default_kind_is_risk() {
        assert_eq!(AgentKind::default(), AgentKind::Risk);
    }

    #[test]
    fn only_refund_and_complaint_capture_a_reason() {
        assert!(AgentKind::Refund.captures_reason());
        assert!(AgentKind::Complaint.captures_reason());
        assert!(!AgentKind::Risk.captures_reason());
        assert!(!AgentKind::Product.captures_reason());
        assert!(!AgentKind::Delivery.captures_reason());
    }

    #[test]
    fn only_complaint_accepts_attachments() {
        assert!(AgentKind::Complaint.accepts_attachments());
        assert!(!AgentKind::Refund.accepts_attachments());
    }
}
