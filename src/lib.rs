//! Firebase MCP Agent Library
//!
//! Connects a conversational agent to a Firebase MCP server. Remote Firebase
//! operations are exposed as named tools, and the agent falls back to local
//! tools when the server cannot be reached.

pub mod agent;
pub mod config;
pub mod error;
pub mod graph;
pub mod mcp;
pub mod tools;

pub use agent::{Agent, AgentAssembler, AgentKind};
pub use config::Config;
pub use error::{BridgeError, Result};
pub use graph::{ConversationState, FirebaseNode, Message, Signal};
pub use mcp::availability::AvailabilityGate;
pub use mcp::client::RemoteToolClient;
pub use mcp::types::ToolCallResult;
