//! Remote-backed and fallback Firebase agents
//!
//! Both variants plan with [`planner::plan`] and run at most one tool per
//! turn. They differ only in the tool set they are bound to and in how they
//! word their replies.

use async_trait::async_trait;
use tracing::debug;

use crate::agent::planner::{self, Plan};
use crate::agent::{Agent, AgentKind, AgentReply};
use crate::config::AgentProfile;
use crate::graph::state::{ConversationState, Message, Role};
use crate::mcp::types::ToolCallResult;
use crate::tools::ToolRegistry;

/// Prefix of every fallback assistant message
pub const FALLBACK_NOTICE: &str =
    "Firebase MCP server is unavailable, answering with local fallback tools.";

/// Agent whose tools call the Firebase MCP server
pub struct RemoteBackedAgent {
    inner: ToolAgent,
}

impl RemoteBackedAgent {
    pub fn new(profile: AgentProfile, tools: ToolRegistry) -> Self {
        Self {
            inner: ToolAgent { profile, tools },
        }
    }
}

#[async_trait]
impl Agent for RemoteBackedAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Remote
    }

    fn profile(&self) -> &AgentProfile {
        &self.inner.profile
    }

    fn tools(&self) -> &ToolRegistry {
        &self.inner.tools
    }

    async fn invoke(&self, state: &ConversationState) -> AgentReply {
        self.inner.turn(state).await
    }
}

/// Agent whose tools are local, non-networked stand-ins
pub struct FallbackAgent {
    inner: ToolAgent,
}

impl FallbackAgent {
    pub fn new(profile: AgentProfile, tools: ToolRegistry) -> Self {
        Self {
            inner: ToolAgent { profile, tools },
        }
    }
}

#[async_trait]
impl Agent for FallbackAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Fallback
    }

    fn profile(&self) -> &AgentProfile {
        &self.inner.profile
    }

    fn tools(&self) -> &ToolRegistry {
        &self.inner.tools
    }

    async fn invoke(&self, state: &ConversationState) -> AgentReply {
        let mut reply = self.inner.turn(state).await;
        for message in reply
            .messages
            .iter_mut()
            .filter(|m| m.role == Role::Assistant)
        {
            message.content = format!("{} {}", FALLBACK_NOTICE, message.content);
        }
        reply
    }
}

/// Behavior shared by both variants
struct ToolAgent {
    profile: AgentProfile,
    tools: ToolRegistry,
}

impl ToolAgent {
    async fn turn(&self, state: &ConversationState) -> AgentReply {
        let Some(input) = state.last_user_message() else {
            return self.help("Ask me about your Firebase project.");
        };

        match planner::plan(input) {
            Plan::Finish => AgentReply {
                messages: vec![Message::assistant(format!(
                    "Goodbye from the {}.",
                    self.profile.name
                ))],
                tool: None,
                finished: true,
            },
            Plan::Call(call) if self.tools.contains(call.tool) => {
                debug!(tool = call.tool, "Agent invoking tool");
                let result = self.tools.invoke(call.tool, call.arguments).await;

                AgentReply {
                    messages: vec![
                        Message::tool(call.tool, result.to_value().to_string()),
                        Message::assistant(summarize(call.tool, &result)),
                    ],
                    tool: Some(call.tool.to_string()),
                    finished: false,
                }
            }
            Plan::Incomplete { tool, missing } => AgentReply {
                messages: vec![Message::assistant(format!(
                    "To run {} I need the {}.",
                    tool, missing
                ))],
                tool: None,
                finished: false,
            },
            Plan::Call(_) | Plan::Unrecognized => {
                self.help("I could not match that request to a Firebase tool.")
            }
        }
    }

    fn help(&self, lead: &str) -> AgentReply {
        AgentReply {
            messages: vec![Message::assistant(format!(
                "{} Available tools: {}.",
                lead,
                self.tools.names().join(", ")
            ))],
            tool: None,
            finished: false,
        }
    }
}

fn summarize(tool: &str, result: &ToolCallResult) -> String {
    match result {
        ToolCallResult::Success(payload) => match payload.as_array() {
            Some(items) => format!("{} returned {} item(s): {}", tool, items.len(), payload),
            None => format!("{} returned: {}", tool, payload),
        },
        ToolCallResult::Error { error } => format!("{} failed: {}", tool, error),
    }
}
