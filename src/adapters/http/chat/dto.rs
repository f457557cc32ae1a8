//! Request types for chat endpoints.
//!
//! Responses are [`crate::application::ConversationSnapshot`] serialized
//! directly.

use serde::Deserialize;

use crate::domain::chat::{AgentKind, ContextMetadata, OpenOptions};
use crate::domain::foundation::{ChatSessionId, CustomerId, OrderId, OrderItemId};

#[derive(Debug, Deserialize)]
pub struct OpenChatRequest {
    pub title: String,
    pub agent_kind: AgentKind,
    #[serde(default)]
    pub initial_query: Option<String>,
    #[serde(default)]
    pub initial_display: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub order_item_id: Option<i64>,
}

impl From<OpenChatRequest> for OpenOptions {
    fn from(req: OpenChatRequest) -> Self {
        OpenOptions {
            title: req.title,
            agent_kind: req.agent_kind,
            initial_query: req.initial_query,
            initial_display: req.initial_display,
            context: ContextMetadata {
                customer_id: req.customer_id.map(CustomerId::new),
                order_id: req.order_id.map(OrderId::new),
                order_item_id: req.order_item_id.map(OrderItemId::new),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub session_id: ChatSessionId,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloseRequest {
    pub session_id: ChatSessionId,
}
