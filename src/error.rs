//! Error types for the Firebase MCP agent bridge
//!
//! Transport, decode and upstream failures are turned into
//! [`ToolCallResult::Error`](crate::mcp::types::ToolCallResult) at the client
//! boundary. Only configuration errors reach callers of agent assembly.

use thiserror::Error;

/// Main error type for the bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors talking to the remote tool server
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Malformed responses from the remote tool server
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Tool invocation errors
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid MCP endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },
}

/// Transport-level failures
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Firebase MCP server unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u128 },

    #[error("Firebase MCP server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Response decoding failures
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid response body: {message}")]
    InvalidBody { message: String },
}

/// Tool invocation errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// Domain-level failure reported by the remote server, passed through verbatim
    #[error("{message}")]
    Upstream { message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
