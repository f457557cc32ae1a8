//! Conversation transcript turns.

use serde::{Deserialize, Serialize};

/// Who authored a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Text the shopper typed (or an attachment message sent on their
    /// behalf).
    User,
    /// A reply delivered by the backend agent.
    Agent,
    /// An inline failure notice; the conversation stays usable.
    Error,
}

/// One entry in the append-only transcript of a conversation.
///
/// Turns exist for replay and display only. They are never sent back to the
/// agent runtime, which tracks its own context by session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    /// Creates a new turn.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an agent turn.
    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Agent, content)
    }

    /// Creates an error turn.
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Error, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(Turn::user("hi").role, TurnRole::User);
        assert_eq!(Turn::agent("hello").role, TurnRole::Agent);
        assert_eq!(Turn::error("oops").role, TurnRole::Error);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&TurnRole::Error).unwrap(), "\"error\"");
    }
}
