//! Firebase graph node
//!
//! `step` is the node's state transition: run the agent once against the
//! incoming state and return a new state with the reply appended.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::agent::{Agent, AgentAssembler};
use crate::error::Result;
use crate::graph::state::{ConversationState, Signal};

/// Context key holding the agent variant
pub const CONTEXT_AGENT_KIND: &str = "agent_kind";

/// Context key holding the last tool that ran
pub const CONTEXT_LAST_TOOL: &str = "last_tool";

/// Graph node driving the Firebase agent
pub struct FirebaseNode {
    assembler: AgentAssembler,
    agent: OnceCell<Arc<dyn Agent>>,
}

impl FirebaseNode {
    pub fn new(assembler: AgentAssembler) -> Self {
        Self {
            assembler,
            agent: OnceCell::new(),
        }
    }

    /// The node's agent, assembled on first use
    pub async fn agent(&self) -> Result<Arc<dyn Agent>> {
        self.agent
            .get_or_try_init(|| self.assembler.build())
            .await
            .cloned()
    }

    /// Run one turn and return the updated state; the input is left untouched
    pub async fn step(&self, state: &ConversationState) -> Result<ConversationState> {
        if state.signal.is_done() {
            return Ok(state.clone());
        }

        let agent = self.agent().await?;
        let reply = agent.invoke(state).await;

        let mut next = state.clone();
        next.messages.extend(reply.messages);
        next.init_run = false;
        next.signal = if reply.finished {
            Signal::Done
        } else {
            Signal::Continue
        };
        next.context.insert(
            CONTEXT_AGENT_KIND.to_string(),
            Value::String(agent.kind().to_string()),
        );
        if let Some(tool) = reply.tool {
            next.context.insert(CONTEXT_LAST_TOOL.to_string(), Value::String(tool));
        }

        debug!(
            signal = %next.signal,
            messages = next.messages.len(),
            "Firebase node step complete"
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mcp::availability::AvailabilityGate;

    fn fallback_node() -> FirebaseNode {
        let config = Config::new("http://127.0.0.1:8001/mcp/").unwrap();
        let gate = Arc::new(AvailabilityGate::fixed(false));
        FirebaseNode::new(AgentAssembler::with_gate(config, gate).unwrap())
    }

    #[tokio::test]
    async fn test_step_appends_and_advances() {
        let node = fallback_node();
        let state = ConversationState::from_user("list collections");

        let next = node.step(&state).await.unwrap();

        assert_eq!(state.messages.len(), 1);
        assert!(state.init_run);
        assert_eq!(&next.messages[..1], &state.messages[..]);
        assert!(next.messages.len() > 1);
        assert_eq!(next.signal, Signal::Continue);
        assert!(!next.init_run);
        assert_eq!(next.context[CONTEXT_AGENT_KIND], "fallback");
        assert_eq!(next.context[CONTEXT_LAST_TOOL], "firestore_list_collections");
    }

    #[tokio::test]
    async fn test_step_finishes() {
        let node = fallback_node();
        let mut state = node
            .step(&ConversationState::from_user("list files"))
            .await
            .unwrap();
        state.push_user("bye");

        let done = node.step(&state).await.unwrap();
        assert_eq!(done.signal, Signal::Done);

        let again = node.step(&done).await.unwrap();
        assert_eq!(again, done);
    }

    #[tokio::test]
    async fn test_agent_is_cached() {
        let node = fallback_node();
        let first = node.agent().await.unwrap();
        let second = node.agent().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
