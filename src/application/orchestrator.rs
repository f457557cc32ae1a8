//! Session Orchestrator - owns the single open conversation.
//!
//! At most one conversation panel is open system-wide. Opening a new
//! conversation replaces the current one; the old session's turns are
//! discarded, and any reply still in flight for it is simply never
//! observed (no cancellation signal is sent upstream).
//!
//! The slot lock is never held across a gateway or storage call: each
//! operation begins the turn under the lock, performs the network call
//! unlocked, then re-acquires the lock and applies the outcome only if the
//! slot still holds the same session.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::chat::{AgentKind, ConversationSession, OpenOptions, Turn};
use crate::domain::foundation::{ChatSessionId, DomainError};
use crate::ports::{AgentGateway, AttachmentStore};

/// Read-only view of the open conversation, for display and replay.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub session_id: ChatSessionId,
    pub agent_kind: AgentKind,
    pub title: String,
    pub pending_capture: bool,
    pub awaiting_reply: bool,
    pub turns: Vec<Turn>,
}

impl From<&ConversationSession> for ConversationSnapshot {
    fn from(session: &ConversationSession) -> Self {
        Self {
            session_id: session.session_id(),
            agent_kind: session.agent_kind(),
            title: session.title().to_string(),
            pending_capture: session.pending_capture(),
            awaiting_reply: session.awaiting_reply(),
            turns: session.turns().to_vec(),
        }
    }
}

/// Creates and destroys conversation sessions and routes user turns
/// through them.
pub struct SessionOrchestrator {
    gateway: Arc<dyn AgentGateway>,
    attachments: Arc<dyn AttachmentStore>,
    current: Mutex<Option<ConversationSession>>,
}

impl SessionOrchestrator {
    /// Creates an orchestrator with no open conversation.
    pub fn new(gateway: Arc<dyn AgentGateway>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self {
            gateway,
            attachments,
            current: Mutex::new(None),
        }
    }

    /// Opens a conversation, replacing any currently open one, and runs
    /// the seed dispatch when the intent requires an immediate first turn.
    pub async fn open_conversation(
        &self,
        options: OpenOptions,
    ) -> Result<ConversationSnapshot, DomainError> {
        let (session, dispatch) = ConversationSession::open(options);
        let session_id = session.session_id();
        let agent_kind = session.agent_kind();
        info!(%session_id, %agent_kind, "conversation opened");

        {
            let mut slot = self.current.lock().await;
            if let Some(previous) = slot.replace(session) {
                info!(previous = %previous.session_id(), "replaced open conversation");
            }
        }

        match dispatch {
            Some(dispatch) => {
                let outcome = self
                    .gateway
                    .invoke(agent_kind, session_id, &dispatch.text)
                    .await
                    .map_err(DomainError::from);
                self.apply_outcome(session_id, outcome).await
            }
            None => self.snapshot_of(session_id).await,
        }
    }

    /// Submits a typed message to the open conversation.
    pub async fn submit_message(
        &self,
        session_id: ChatSessionId,
        text: &str,
    ) -> Result<ConversationSnapshot, DomainError> {
        let (agent_kind, payload) = {
            let mut slot = self.current.lock().await;
            let session = Self::open_session(&mut slot, session_id)?;
            let dispatch = session.begin_message(text)?;
            (session.agent_kind(), dispatch.text)
        };

        let outcome = self
            .gateway
            .invoke(agent_kind, session_id, &payload)
            .await
            .map_err(DomainError::from);
        self.apply_outcome(session_id, outcome).await
    }

    /// Stores an attachment and dispatches its locator message to the open
    /// (complaint) conversation.
    pub async fn submit_attachment(
        &self,
        session_id: ChatSessionId,
        content: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<ConversationSnapshot, DomainError> {
        let agent_kind = {
            let mut slot = self.current.lock().await;
            let session = Self::open_session(&mut slot, session_id)?;
            if !session.agent_kind().accepts_attachments() {
                return Err(DomainError::validation(format!(
                    "{} conversations do not accept attachments",
                    session.agent_kind()
                )));
            }
            if session.awaiting_reply() {
                return Err(DomainError::session_busy());
            }
            session.agent_kind()
        };

        let locator = match self
            .attachments
            .store(content, original_name, content_type)
            .await
        {
            Ok(locator) => locator,
            Err(err) => {
                // Storage failure: inline error turn, no dispatch, and the
                // pending capture is not consumed.
                warn!(%session_id, error = %err, "attachment storage failed");
                let mut slot = self.current.lock().await;
                let session = Self::open_session(&mut slot, session_id)?;
                session.record_storage_failure(&err.into());
                return Ok(ConversationSnapshot::from(&*session));
            }
        };

        let payload = {
            let mut slot = self.current.lock().await;
            let session = Self::open_session(&mut slot, session_id)?;
            session.begin_attachment(locator.as_str())?.text
        };

        let outcome = self
            .gateway
            .invoke(agent_kind, session_id, &payload)
            .await
            .map_err(DomainError::from);
        self.apply_outcome(session_id, outcome).await
    }

    /// Closes the conversation if it is still the open one. Closing an
    /// already-replaced session is a no-op.
    pub async fn close_conversation(&self, session_id: ChatSessionId) {
        let mut slot = self.current.lock().await;
        if slot.as_ref().map(|s| s.session_id()) == Some(session_id) {
            info!(%session_id, "conversation closed");
            *slot = None;
        }
    }

    /// Snapshot of the currently open conversation, if any.
    pub async fn current(&self) -> Option<ConversationSnapshot> {
        let slot = self.current.lock().await;
        slot.as_ref().map(ConversationSnapshot::from)
    }

    async fn snapshot_of(
        &self,
        session_id: ChatSessionId,
    ) -> Result<ConversationSnapshot, DomainError> {
        let mut slot = self.current.lock().await;
        let session = Self::open_session(&mut slot, session_id)?;
        Ok(ConversationSnapshot::from(&*session))
    }

    fn open_session(
        slot: &mut Option<ConversationSession>,
        session_id: ChatSessionId,
    ) -> Result<&mut ConversationSession, DomainError> {
        match slot {
            Some(session) if session.session_id() == session_id => Ok(session),
            _ => Err(DomainError::session_not_found(
                "No open conversation with this session id",
            )),
        }
    }

    /// Applies a dispatch outcome if the session is still the open one;
    /// replies for replaced sessions are dropped unobserved.
    async fn apply_outcome(
        &self,
        session_id: ChatSessionId,
        outcome: Result<String, DomainError>,
    ) -> Result<ConversationSnapshot, DomainError> {
        let mut slot = self.current.lock().await;
        match Self::open_session(&mut slot, session_id) {
            Ok(session) => {
                session.finish_turn(outcome);
                Ok(ConversationSnapshot::from(&*session))
            }
            Err(err) => {
                info!(%session_id, "dropping reply for replaced conversation");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::agent::MockAgentGateway;
    use crate::adapters::storage::InMemoryAttachmentStore;
    use crate::domain::chat::{ContextMetadata, TurnRole, REFUND_PROMPT};
    use crate::domain::foundation::{CustomerId, ErrorCode, OrderId, OrderItemId};
    use crate::ports::AgentGatewayError;

    fn orchestrator_with(gateway: MockAgentGateway) -> (SessionOrchestrator, MockAgentGateway) {
        let orchestrator = SessionOrchestrator::new(
            Arc::new(gateway.clone()),
            Arc::new(InMemoryAttachmentStore::new()),
        );
        (orchestrator, gateway)
    }

    fn refund_options() -> OpenOptions {
        OpenOptions {
            title: "Refund request".to_string(),
            agent_kind: AgentKind::Refund,
            context: ContextMetadata::for_order_item(
                CustomerId::new(10),
                OrderId::new(20),
                OrderItemId::new(30),
            ),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn refund_open_seeds_prompt_without_contacting_agent() {
        let (orchestrator, gateway) = orchestrator_with(MockAgentGateway::new());

        let snapshot = orchestrator.open_conversation(refund_options()).await.unwrap();

        assert_eq!(snapshot.turns.len(), 1);
        assert_eq!(snapshot.turns[0].content, REFUND_PROMPT);
        assert!(snapshot.pending_capture);
        assert!(gateway.invocations().is_empty());
    }

    #[tokio::test]
    async fn risk_open_with_query_dispatches_immediately() {
        let (orchestrator, gateway) =
            orchestrator_with(MockAgentGateway::new().with_reply("Low risk."));

        let snapshot = orchestrator
            .open_conversation(OpenOptions {
                title: "Risk".to_string(),
                agent_kind: AgentKind::Risk,
                initial_query: Some("Assess product 4".to_string()),
                initial_display: Some("Checking...".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(snapshot.turns.len(), 2);
        assert_eq!(snapshot.turns[0].content, "Checking...");
        assert_eq!(snapshot.turns[1].content, "Low risk.");
        assert!(!snapshot.awaiting_reply);

        let calls = gateway.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "Assess product 4");
        assert_eq!(calls[0].session_id, snapshot.session_id);
    }

    #[tokio::test]
    async fn first_refund_message_is_rewritten_then_verbatim() {
        let (orchestrator, gateway) = orchestrator_with(
            MockAgentGateway::new()
                .with_reply("Refund registered.")
                .with_reply("Anything else?"),
        );
        let opened = orchestrator.open_conversation(refund_options()).await.unwrap();

        orchestrator
            .submit_message(opened.session_id, "It arrived broken")
            .await
            .unwrap();
        let snapshot = orchestrator
            .submit_message(opened.session_id, "Thanks")
            .await
            .unwrap();

        let calls = gateway.invocations();
        assert!(calls[0].text.contains("customer_id \"10\""));
        assert!(calls[0].text.contains("the reason of the refund is \"It arrived broken\""));
        assert_eq!(calls[1].text, "Thanks");
        assert!(!snapshot.pending_capture);
    }

    #[tokio::test]
    async fn gateway_failure_becomes_inline_error_turn() {
        let (orchestrator, _) = orchestrator_with(
            MockAgentGateway::new().with_failure(AgentGatewayError::EmptyCompletion),
        );
        let opened = orchestrator.open_conversation(refund_options()).await.unwrap();

        let snapshot = orchestrator
            .submit_message(opened.session_id, "Damaged")
            .await
            .unwrap();

        assert_eq!(snapshot.turns.last().unwrap().role, TurnRole::Error);
        assert!(!snapshot.awaiting_reply);

        // Conversation stays usable after the failure.
        let retry = orchestrator
            .submit_message(opened.session_id, "Retry please")
            .await
            .unwrap();
        assert_eq!(retry.turns.last().unwrap().role, TurnRole::Agent);
    }

    #[tokio::test]
    async fn opening_discards_previous_turns() {
        let (orchestrator, _) = orchestrator_with(MockAgentGateway::new());
        let first = orchestrator.open_conversation(refund_options()).await.unwrap();
        orchestrator
            .submit_message(first.session_id, "Broken")
            .await
            .unwrap();

        let second = orchestrator
            .open_conversation(OpenOptions {
                title: "Help".to_string(),
                agent_kind: AgentKind::Delivery,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_ne!(first.session_id, second.session_id);
        assert!(second.turns.is_empty());

        // The replaced session no longer accepts input.
        let err = orchestrator
            .submit_message(first.session_id, "Hello?")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn complaint_attachment_sends_structured_locator_message() {
        let (orchestrator, gateway) =
            orchestrator_with(MockAgentGateway::new().with_reply("Photo received."));
        let opened = orchestrator
            .open_conversation(OpenOptions {
                title: "Complaint".to_string(),
                agent_kind: AgentKind::Complaint,
                context: ContextMetadata::for_order_item(
                    CustomerId::new(1),
                    OrderId::new(2),
                    OrderItemId::new(3),
                ),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(opened.pending_capture);

        let snapshot = orchestrator
            .submit_attachment(opened.session_id, b"jpeg bytes", "dent.jpg", "image/jpeg")
            .await
            .unwrap();

        let calls = gateway.invocations();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].text.contains("customer_id \"1\""));
        assert!(calls[0].text.contains("mem://attachments/"));
        assert!(!snapshot.pending_capture);
        assert_eq!(snapshot.turns.last().unwrap().content, "Photo received.");
    }

    #[tokio::test]
    async fn attachment_storage_failure_appends_error_and_keeps_capture() {
        let store = InMemoryAttachmentStore::new();
        store.fail_next("bucket unavailable");
        let gateway = MockAgentGateway::new();
        let orchestrator =
            SessionOrchestrator::new(Arc::new(gateway.clone()), Arc::new(store));

        let opened = orchestrator
            .open_conversation(OpenOptions {
                title: "Complaint".to_string(),
                agent_kind: AgentKind::Complaint,
                ..Default::default()
            })
            .await
            .unwrap();

        let snapshot = orchestrator
            .submit_attachment(opened.session_id, b"bytes", "x.jpg", "image/jpeg")
            .await
            .unwrap();

        assert_eq!(snapshot.turns.last().unwrap().role, TurnRole::Error);
        assert!(snapshot.pending_capture, "storage failure must not consume the capture");
        assert!(gateway.invocations().is_empty(), "no dispatch on storage failure");
    }

    #[tokio::test]
    async fn refund_session_rejects_attachments() {
        let (orchestrator, gateway) = orchestrator_with(MockAgentGateway::new());
        let opened = orchestrator.open_conversation(refund_options()).await.unwrap();

        let err = orchestrator
            .submit_attachment(opened.session_id, b"bytes", "x.jpg", "image/jpeg")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(gateway.invocations().is_empty());
    }

    #[tokio::test]
    async fn close_clears_only_the_matching_session() {
        let (orchestrator, _) = orchestrator_with(MockAgentGateway::new());
        let opened = orchestrator.open_conversation(refund_options()).await.unwrap();

        orchestrator.close_conversation(ChatSessionId::new()).await;
        assert!(orchestrator.current().await.is_some());

        orchestrator.close_conversation(opened.session_id).await;
        assert!(orchestrator.current().await.is_none());
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_dispatch() {
        let (orchestrator, gateway) = orchestrator_with(MockAgentGateway::new());
        let opened = orchestrator.open_conversation(refund_options()).await.unwrap();

        let err = orchestrator
            .submit_message(opened.session_id, "   ")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(gateway.invocations().is_empty());
    }
}
