//! Conversation session state machine.
//!
//! A session moves through three phases: it is seeded exactly once at
//! construction, then alternates between accepting one user submission and
//! waiting for the matching agent reply. The only backpressure in the
//! system is the awaiting-reply flag: a second submission while a reply is
//! in flight is rejected, never queued.
//!
//! The machine itself is synchronous. Network dispatch lives in the
//! application layer, which brackets every gateway call between
//! [`ConversationSession::begin_message`] (or its attachment sibling) and
//! [`ConversationSession::finish_turn`]. That bracket guarantees every
//! dispatch appends exactly one agent turn or exactly one error turn, never
//! zero, never both.

use crate::domain::foundation::{ChatSessionId, DomainError};

use super::{AgentKind, ContextMetadata, Turn};

/// Fixed prompt seeded into refund conversations.
pub const REFUND_PROMPT: &str = "Please state the reason for the refund.";

/// Fixed prompt seeded into complaint conversations.
pub const COMPLAINT_PROMPT: &str =
    "Please describe the issue with your order. You can also attach a photo of the damaged product.";

/// Options for opening a conversation.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Panel title shown to the shopper.
    pub title: String,
    /// Which agent handles the session. Defaults to risk assessment.
    pub agent_kind: AgentKind,
    /// Query dispatched immediately on open (risk/product/delivery flows).
    pub initial_query: Option<String>,
    /// Display text shown for the initial query when it differs from the
    /// raw query sent to the agent.
    pub initial_display: Option<String>,
    /// Order identifiers for the structured first refund/complaint turn.
    pub context: ContextMetadata,
}

/// A payload the caller must now deliver to the Agent Gateway.
///
/// Returned by the `begin_*` transitions; the session is in awaiting-reply
/// state until [`ConversationSession::finish_turn`] is called with the
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub text: String,
}

/// Per-conversation state machine.
///
/// Owns the agent kind (immutable for the session's life), the
/// pending-capture mode, the awaiting-reply flag, and the append-only
/// transcript.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    session_id: ChatSessionId,
    agent_kind: AgentKind,
    title: String,
    context: ContextMetadata,
    pending_capture: bool,
    awaiting_reply: bool,
    turns: Vec<Turn>,
}

impl ConversationSession {
    /// Opens a session and runs the seed transition exactly once.
    ///
    /// Seed behavior by kind:
    /// - Refund/Complaint: one fixed agent prompt, pending-capture on, no
    ///   dispatch until the shopper supplies text.
    /// - Risk/Product/Delivery with an initial query: one user turn showing
    ///   the display text (falling back to the raw query), plus a
    ///   [`Dispatch`] of the raw query the caller must deliver immediately.
    /// - Anything else: empty transcript, session waits for input.
    pub fn open(options: OpenOptions) -> (Self, Option<Dispatch>) {
        let mut session = Self {
            session_id: ChatSessionId::new(),
            agent_kind: options.agent_kind,
            title: options.title,
            context: options.context,
            pending_capture: false,
            awaiting_reply: false,
            turns: Vec::new(),
        };

        if session.agent_kind.captures_reason() {
            let prompt = match session.agent_kind {
                AgentKind::Refund => REFUND_PROMPT,
                _ => COMPLAINT_PROMPT,
            };
            session.turns.push(Turn::agent(prompt));
            session.pending_capture = true;
            return (session, None);
        }

        match options.initial_query.filter(|q| !q.trim().is_empty()) {
            Some(query) => {
                let display = options
                    .initial_display
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| query.clone());
                session.turns.push(Turn::user(display));
                session.awaiting_reply = true;
                (session, Some(Dispatch { text: query }))
            }
            None => (session, None),
        }
    }

    /// Accepts a typed message: appends the optimistic user turn, performs
    /// the at-most-once pending-capture rewrite, and returns the payload to
    /// dispatch.
    ///
    /// The transcript shows what the shopper typed; the rewrite only
    /// affects the outbound payload.
    pub fn begin_message(&mut self, text: &str) -> Result<Dispatch, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::validation("Message text is required"));
        }
        self.begin_dispatch(text.to_string())
    }

    /// Accepts a stored attachment: the locator is embedded in the fixed
    /// attachment template and dispatched as if the shopper had typed that
    /// message, including the pending-capture rewrite if still pending.
    ///
    /// Only complaint sessions accept attachments.
    pub fn begin_attachment(&mut self, locator: &str) -> Result<Dispatch, DomainError> {
        if !self.agent_kind.accepts_attachments() {
            return Err(DomainError::validation(format!(
                "{} conversations do not accept attachments",
                self.agent_kind
            )));
        }
        let message = format!("Here is the image of the damaged product: {locator}");
        self.begin_dispatch(message)
    }

    fn begin_dispatch(&mut self, message: String) -> Result<Dispatch, DomainError> {
        if self.awaiting_reply {
            return Err(DomainError::session_busy());
        }

        let payload = if self.pending_capture {
            // One structural rewrite per session, on the first user-authored
            // turn while pending. Everything after goes verbatim.
            self.pending_capture = false;
            self.rewrite_capture(&message)
        } else {
            message.clone()
        };

        self.turns.push(Turn::user(message));
        self.awaiting_reply = true;
        Ok(Dispatch { text: payload })
    }

    /// Records the outcome of a dispatch: exactly one agent turn on success
    /// or exactly one error turn on failure, then clears awaiting-reply.
    pub fn finish_turn(&mut self, outcome: Result<String, DomainError>) {
        match outcome {
            Ok(reply) => self.turns.push(Turn::agent(reply)),
            Err(err) => self.turns.push(Turn::error(err.message)),
        }
        self.awaiting_reply = false;
    }

    /// Records an attachment storage failure as an inline error turn.
    ///
    /// No dispatch occurred, so pending-capture and awaiting-reply are left
    /// untouched.
    pub fn record_storage_failure(&mut self, err: &DomainError) {
        self.turns.push(Turn::error(err.message.clone()));
    }

    fn rewrite_capture(&self, reason: &str) -> String {
        match self.agent_kind {
            AgentKind::Refund => format!(
                "I need a refund for this details : customer_id \"{}\", order_id \"{}\", order_item_id \"{}\" , the reason of the refund is \"{}\"",
                self.context.customer_field(),
                self.context.order_field(),
                self.context.order_item_field(),
                reason
            ),
            _ => format!(
                "I want to raise a complaint for this details : customer_id \"{}\", order_id \"{}\", order_item_id \"{}\" , the issue is \"{}\"",
                self.context.customer_field(),
                self.context.order_field(),
                self.context.order_item_field(),
                reason
            ),
        }
    }

    pub fn session_id(&self) -> ChatSessionId {
        self.session_id
    }

    pub fn agent_kind(&self) -> AgentKind {
        self.agent_kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn context(&self) -> &ContextMetadata {
        &self.context
    }

    pub fn pending_capture(&self) -> bool {
        self.pending_capture
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::TurnRole;
    use crate::domain::foundation::{CustomerId, ErrorCode, OrderId, OrderItemId};

    fn refund_options() -> OpenOptions {
        OpenOptions {
            title: "Refund".to_string(),
            agent_kind: AgentKind::Refund,
            context: ContextMetadata::for_order_item(
                CustomerId::new(1),
                OrderId::new(2),
                OrderItemId::new(3),
            ),
            ..Default::default()
        }
    }

    fn complaint_options() -> OpenOptions {
        OpenOptions {
            title: "Complaint".to_string(),
            agent_kind: AgentKind::Complaint,
            context: ContextMetadata::for_order_item(
                CustomerId::new(1),
                OrderId::new(2),
                OrderItemId::new(3),
            ),
            ..Default::default()
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Seeding
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn refund_seeds_fixed_prompt_and_pending_capture() {
        let (session, dispatch) = ConversationSession::open(refund_options());

        assert!(dispatch.is_none());
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0], Turn::agent(REFUND_PROMPT));
        assert!(session.pending_capture());
        assert!(!session.awaiting_reply());
    }

    #[test]
    fn complaint_seeds_fixed_prompt_and_pending_capture() {
        let (session, dispatch) = ConversationSession::open(complaint_options());

        assert!(dispatch.is_none());
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0], Turn::agent(COMPLAINT_PROMPT));
        assert!(session.pending_capture());
    }

    #[test]
    fn risk_with_initial_query_seeds_user_turn_and_dispatch() {
        let (session, dispatch) = ConversationSession::open(OpenOptions {
            title: "Risk check".to_string(),
            agent_kind: AgentKind::Risk,
            initial_query: Some("Assess risk for product 9".to_string()),
            initial_display: Some("Checking this product...".to_string()),
            ..Default::default()
        });

        assert_eq!(
            dispatch,
            Some(Dispatch {
                text: "Assess risk for product 9".to_string()
            })
        );
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0], Turn::user("Checking this product..."));
        assert!(session.awaiting_reply());
        assert!(!session.pending_capture());
    }

    #[test]
    fn display_text_falls_back_to_raw_query() {
        let (session, _) = ConversationSession::open(OpenOptions {
            agent_kind: AgentKind::Product,
            initial_query: Some("Is this waterproof?".to_string()),
            ..Default::default()
        });

        assert_eq!(session.turns()[0], Turn::user("Is this waterproof?"));
    }

    #[test]
    fn no_query_and_no_capture_seeds_nothing() {
        let (session, dispatch) = ConversationSession::open(OpenOptions {
            agent_kind: AgentKind::Delivery,
            ..Default::default()
        });

        assert!(dispatch.is_none());
        assert!(session.turns().is_empty());
        assert!(!session.awaiting_reply());
        assert!(!session.pending_capture());
    }

    #[test]
    fn seeding_dispatch_resolves_into_agent_turn() {
        let (mut session, dispatch) = ConversationSession::open(OpenOptions {
            agent_kind: AgentKind::Delivery,
            initial_query: Some("Where is order 5?".to_string()),
            ..Default::default()
        });
        assert!(dispatch.is_some());

        session.finish_turn(Ok("It ships tomorrow.".to_string()));

        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.turns()[1], Turn::agent("It ships tomorrow."));
        assert!(!session.awaiting_reply());
    }

    // ───────────────────────────────────────────────────────────────
    // Pending-capture rewrite
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn first_refund_message_is_rewritten_with_context() {
        let (mut session, _) = ConversationSession::open(refund_options());

        let dispatch = session.begin_message("It arrived broken").unwrap();

        assert_eq!(
            dispatch.text,
            "I need a refund for this details : customer_id \"1\", order_id \"2\", \
             order_item_id \"3\" , the reason of the refund is \"It arrived broken\""
        );
        // The transcript shows what the shopper typed, not the payload.
        assert_eq!(session.turns()[1], Turn::user("It arrived broken"));
        assert!(!session.pending_capture());
    }

    #[test]
    fn rewrite_happens_at_most_once_per_session() {
        let (mut session, _) = ConversationSession::open(refund_options());

        let first = session.begin_message("Wrong size").unwrap();
        session.finish_turn(Ok("Noted.".to_string()));
        let second = session.begin_message("When will I hear back?").unwrap();

        assert!(first.text.contains("order_item_id \"3\""));
        assert_eq!(second.text, "When will I hear back?");
    }

    #[test]
    fn pending_capture_never_reverts_to_true() {
        let (mut session, _) = ConversationSession::open(complaint_options());
        assert!(session.pending_capture());

        session.begin_message("Box was crushed").unwrap();
        assert!(!session.pending_capture());

        session.finish_turn(Err(DomainError::agent("agent down")));
        assert!(!session.pending_capture());

        session.begin_message("Still crushed").unwrap();
        session.finish_turn(Ok("Sorry to hear that.".to_string()));
        assert!(!session.pending_capture());
    }

    #[test]
    fn complaint_rewrite_embeds_context_fields() {
        let (mut session, _) = ConversationSession::open(complaint_options());

        let dispatch = session.begin_message("Seams are torn").unwrap();

        assert!(dispatch.text.contains("customer_id \"1\""));
        assert!(dispatch.text.contains("order_id \"2\""));
        assert!(dispatch.text.contains("order_item_id \"3\""));
        assert!(dispatch.text.contains("\"Seams are torn\""));
    }

    // ───────────────────────────────────────────────────────────────
    // Backpressure and turn accounting
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn submission_while_awaiting_reply_is_rejected() {
        let (mut session, _) = ConversationSession::open(refund_options());
        session.begin_message("Damaged").unwrap();

        let err = session.begin_message("Hello?").unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionBusy);
        // The rejected message leaves no trace in the transcript.
        assert_eq!(session.turns().len(), 2);
    }

    #[test]
    fn empty_message_is_a_validation_failure() {
        let (mut session, _) = ConversationSession::open(refund_options());

        let err = session.begin_message("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(session.pending_capture(), "rejected input must not consume the capture");
    }

    #[test]
    fn every_dispatch_appends_exactly_one_reply_turn() {
        let (mut session, _) = ConversationSession::open(refund_options());

        session.begin_message("Damaged").unwrap();
        session.finish_turn(Ok("Refund started.".to_string()));
        session.begin_message("Thanks").unwrap();
        session.finish_turn(Err(DomainError::agent("timeout")));

        let roles: Vec<TurnRole> = session.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::Agent, // seed prompt
                TurnRole::User,
                TurnRole::Agent,
                TurnRole::User,
                TurnRole::Error,
            ]
        );
        assert!(!session.awaiting_reply());
    }

    #[test]
    fn failed_dispatch_keeps_conversation_usable() {
        let (mut session, _) = ConversationSession::open(complaint_options());
        session.begin_message("Torn sleeve").unwrap();
        session.finish_turn(Err(DomainError::agent("unreachable")));

        assert!(session.begin_message("Retrying").is_ok());
    }

    // ───────────────────────────────────────────────────────────────
    // Attachments
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn attachment_message_embeds_locator_template() {
        let (mut session, _) = ConversationSession::open(complaint_options());
        // Consume the capture first so the template goes out verbatim.
        session.begin_message("Damaged goods").unwrap();
        session.finish_turn(Ok("Please share a photo.".to_string()));

        let dispatch = session
            .begin_attachment("s3://complaint-kb/abc-photo.jpg")
            .unwrap();

        assert_eq!(
            dispatch.text,
            "Here is the image of the damaged product: s3://complaint-kb/abc-photo.jpg"
        );
    }

    #[test]
    fn attachment_while_pending_produces_single_structured_message() {
        let (mut session, _) = ConversationSession::open(complaint_options());
        assert!(session.pending_capture());

        let dispatch = session
            .begin_attachment("s3://complaint-kb/dent.png")
            .unwrap();

        assert!(dispatch.text.contains("customer_id \"1\""));
        assert!(dispatch.text.contains("s3://complaint-kb/dent.png"));
        assert!(!session.pending_capture());
        // Exactly one user turn was appended for the attachment.
        let user_turns = session
            .turns()
            .iter()
            .filter(|t| t.role == TurnRole::User)
            .count();
        assert_eq!(user_turns, 1);
    }

    #[test]
    fn non_complaint_sessions_reject_attachments() {
        let (mut session, _) = ConversationSession::open(refund_options());

        let err = session.begin_attachment("s3://complaint-kb/x.jpg").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn storage_failure_appends_error_turn_without_advancing_state() {
        let (mut session, _) = ConversationSession::open(complaint_options());

        session.record_storage_failure(&DomainError::storage("upload failed"));

        assert_eq!(session.turns().last().unwrap().role, TurnRole::Error);
        assert!(session.pending_capture());
        assert!(!session.awaiting_reply());
    }
}
