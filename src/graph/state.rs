//! Conversation state
//!
//! The value passed into and returned from the Firebase node: message history,
//! control signal, first-run flag and auxiliary Firebase context.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One conversation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author
    pub role: Role,

    /// Text content; tool messages carry the serialized result mapping
    pub content: String,

    /// Tool that produced the message (tool messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn tool(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_name: Some(name.into()),
        }
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_name: None,
        }
    }
}

/// Control signal of a conversation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Nothing has run yet
    #[default]
    Init,

    /// Waiting for the next user turn
    Continue,

    /// Conversation finished
    Done,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Init => "init",
            Signal::Continue => "continue",
            Signal::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Signal::Done)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State handed to and returned by the Firebase node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Message history, append-only
    pub messages: Vec<Message>,

    /// Control signal
    pub signal: Signal,

    /// Set until the node has run once
    pub init_run: bool,

    /// Auxiliary data for collaborators (agent kind, last tool, ...)
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl ConversationState {
    /// Fresh state holding the given messages
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            signal: Signal::Init,
            init_run: true,
            context: Map::new(),
        }
    }

    /// Fresh state starting with one user message
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(vec![Message::user(content)])
    }

    /// Append a user turn
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Content of the most recent user message
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }

    pub fn is_done(&self) -> bool {
        self.signal.is_done()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
