//! Conversational assistance domain: agent kinds, transcripts, and the
//! per-session state machine.

mod agent_kind;
mod context;
mod session;
mod turn;

pub use agent_kind::AgentKind;
pub use context::ContextMetadata;
pub use session::{
    ConversationSession, Dispatch, OpenOptions, COMPLAINT_PROMPT, REFUND_PROMPT,
};
pub use turn::{Turn, TurnRole};
