//! Mock Agent Gateway for testing.
//!
//! Returns pre-configured replies in order and records every invocation so
//! tests can verify routing and payload rewriting without a live runtime.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::chat::AgentKind;
use crate::domain::foundation::ChatSessionId;
use crate::ports::{AgentGateway, AgentGatewayError};

/// A recorded gateway invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    pub agent_kind: AgentKind,
    pub session_id: ChatSessionId,
    pub text: String,
}

/// Mock gateway with scripted replies (consumed in order).
///
/// When the script is exhausted, further invocations return a fixed echo
/// reply so open-ended tests keep working.
#[derive(Debug, Clone, Default)]
pub struct MockAgentGateway {
    script: Arc<Mutex<VecDeque<Result<String, AgentGatewayError>>>>,
    invocations: Arc<Mutex<Vec<RecordedInvocation>>>,
}

impl MockAgentGateway {
    /// Creates an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    /// Queues a delivery failure.
    pub fn with_failure(self, error: AgentGatewayError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns all invocations recorded so far.
    pub fn invocations(&self) -> Vec<RecordedInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentGateway for MockAgentGateway {
    async fn invoke(
        &self,
        agent_kind: AgentKind,
        session_id: ChatSessionId,
        text: &str,
    ) -> Result<String, AgentGatewayError> {
        self.invocations.lock().unwrap().push(RecordedInvocation {
            agent_kind,
            session_id,
            text: text.to_string(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(format!("echo: {text}")),
        }
    }
}
