//! Firebase agent
//!
//! An [`Agent`] turns a conversation state into the messages to append. Two
//! variants exist, chosen once by the [`AgentAssembler`]: one backed by the
//! Firebase MCP server and one backed by local fallback tools.

pub mod assembler;
pub mod firebase;
pub mod planner;

use std::fmt;

use async_trait::async_trait;

use crate::config::AgentProfile;
use crate::graph::state::{ConversationState, Message};
use crate::tools::ToolRegistry;

pub use assembler::AgentAssembler;
pub use firebase::{FallbackAgent, RemoteBackedAgent};

/// Which tool set an agent is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Remote,
    Fallback,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Remote => "remote",
            AgentKind::Fallback => "fallback",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages produced by one agent turn
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    /// Messages to append, in order
    pub messages: Vec<Message>,

    /// Tool that ran during the turn
    pub tool: Option<String>,

    /// Whether the conversation is complete
    pub finished: bool,
}

/// Conversational agent bound to a fixed tool set
#[async_trait]
pub trait Agent: Send + Sync {
    /// Tool set variant
    fn kind(&self) -> AgentKind;

    /// Name and model settings
    fn profile(&self) -> &AgentProfile;

    /// Tools the agent may call
    fn tools(&self) -> &ToolRegistry;

    /// Run one turn against the current state
    async fn invoke(&self, state: &ConversationState) -> AgentReply;
}
