//! MCP wire types
//!
//! JSON-RPC envelope used to call tools on the Firebase MCP server, plus the
//! bridge's uniform tool call request/result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};

/// JSON-RPC version
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request ID
    pub id: RequestId,

    /// Method name
    pub method: String,

    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a `tools/call` request for one operation
    pub fn call_tool(id: RequestId, request: &ToolCallRequest) -> Self {
        let params = CallToolParams {
            name: request.operation.clone(),
            arguments: Value::Object(request.arguments.clone()),
        };

        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: methods::CALL_TOOL.to_string(),
            params: serde_json::to_value(params).ok(),
        }
    }
}

/// JSON-RPC reply as received by the client
///
/// Lenient on purpose: `jsonrpc` and `id` are not required, and `error` may be
/// either a JSON-RPC error object or a bare message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcReply {
    /// Result (on success)
    #[serde(default)]
    pub result: Option<Value>,

    /// Error (on failure)
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// Error member of a reply
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Rpc(JsonRpcError),
    Message(String),
    Other(Value),
}

impl ErrorBody {
    /// Human-readable message
    pub fn message(&self) -> String {
        match self {
            ErrorBody::Rpc(e) => e.message.clone(),
            ErrorBody::Message(m) => m.clone(),
            ErrorBody::Other(v) => v.to_string(),
        }
    }
}

/// Request ID (can be string or number)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

/// JSON-RPC error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,

    /// Additional data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Call tool params
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Tool name
    pub name: String,

    /// Tool arguments
    #[serde(default)]
    pub arguments: Value,
}

/// Tool result content item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolResultContent {
    /// Text content
    #[serde(rename = "text")]
    Text { text: String },

    /// Image, resource and anything newer; carried but not interpreted
    #[serde(other)]
    Other,
}

/// MCP tool result as returned inside `result`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    /// Result content
    pub content: Vec<ToolResultContent>,

    /// Whether the tool call resulted in an error
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    /// Concatenated text items
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ToolResultContent::Text { text } => Some(text.as_str()),
                ToolResultContent::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Payload carried by the text items
    ///
    /// Each text item is parsed as JSON when possible and kept as a string
    /// otherwise. One item yields its value, several yield an array.
    pub fn payload(&self) -> Value {
        let mut values: Vec<Value> = self
            .content
            .iter()
            .filter_map(|c| match c {
                ToolResultContent::Text { text } => Some(
                    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone())),
                ),
                ToolResultContent::Other => None,
            })
            .collect();

        match values.len() {
            0 => Value::Null,
            1 => values.remove(0),
            _ => Value::Array(values),
        }
    }
}

/// A single named-operation request
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    /// Remote operation name
    pub operation: String,

    /// Operation arguments
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    /// Create a request; the operation name must not be empty
    pub fn new(operation: impl Into<String>, arguments: Map<String, Value>) -> Result<Self> {
        let operation = operation.into();
        if operation.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "operation".to_string(),
            }
            .into());
        }

        Ok(Self {
            operation,
            arguments,
        })
    }
}

/// Message used when a failure carries no usable text
pub const UNSPECIFIED_ERROR: &str = "Firebase MCP server reported an unspecified error";

/// Uniform outcome of a tool call
///
/// Serializes to the payload itself on success and to `{"error": message}` on
/// failure, so the presence of an `error` key discriminates the two. Decoding
/// follows the same rule whatever the `error` value holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolCallResult {
    /// Failure message
    Error { error: String },

    /// Success payload
    Success(Value),
}

impl ToolCallResult {
    /// Create a success result
    pub fn success(payload: Value) -> Self {
        ToolCallResult::Success(payload)
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        ToolCallResult::Error {
            error: message.into(),
        }
    }

    /// Whether this is the error variant
    pub fn is_error(&self) -> bool {
        matches!(self, ToolCallResult::Error { .. })
    }

    /// Success payload, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ToolCallResult::Success(payload) => Some(payload),
            ToolCallResult::Error { .. } => None,
        }
    }

    /// Error message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ToolCallResult::Error { error } => Some(error),
            ToolCallResult::Success(_) => None,
        }
    }

    /// The mapping handed to the hosting agent
    pub fn to_value(&self) -> Value {
        match self {
            ToolCallResult::Success(payload) => payload.clone(),
            ToolCallResult::Error { error } => serde_json::json!({ "error": error }),
        }
    }
}

impl From<Value> for ToolCallResult {
    /// A mapping with an `error` key is the error variant
    ///
    /// String errors are kept as-is, any other value is carried as its JSON
    /// text. Empty or null errors get [`UNSPECIFIED_ERROR`].
    fn from(value: Value) -> Self {
        let Some(error) = value.get("error") else {
            return ToolCallResult::Success(value);
        };

        let message = match error {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            ToolCallResult::error(UNSPECIFIED_ERROR)
        } else {
            ToolCallResult::error(message)
        }
    }
}

impl<'de> Deserialize<'de> for ToolCallResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ToolCallResult::from)
    }
}

/// Tool definition for registration with a hosting framework
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Tool description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Input schema (JSON Schema)
    pub input_schema: Value,
}

/// Tool entry of the discovery document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolInfo {
    Named(String),
    Described {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl ToolInfo {
    /// Tool name
    pub fn name(&self) -> &str {
        match self {
            ToolInfo::Named(name) => name,
            ToolInfo::Described { name, .. } => name,
        }
    }
}

/// Discovery document served on the base path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerDescription {
    /// Server name
    pub name: String,

    /// Server version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Available tools
    #[serde(default)]
    pub tools: Vec<ToolInfo>,
}

/// MCP methods
pub mod methods {
    pub const CALL_TOOL: &str = "tools/call";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_tool_request() {
        let mut args = Map::new();
        args.insert("collection".to_string(), json!("users"));
        let request = ToolCallRequest::new("firestore_list_documents", args).unwrap();

        let rpc = JsonRpcRequest::call_tool(RequestId::Number(1), &request);
        let json = serde_json::to_value(&rpc).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "tools/call");
        assert_eq!(json["params"]["name"], "firestore_list_documents");
        assert_eq!(json["params"]["arguments"]["collection"], "users");
    }

    #[test]
    fn test_empty_operation_rejected() {
        assert!(ToolCallRequest::new("  ", Map::new()).is_err());
    }

    #[test]
    fn test_reply_with_string_error() {
        let reply: JsonRpcReply = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(reply.error.unwrap().message(), "boom");

        let reply: JsonRpcReply = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#,
        )
        .unwrap();
        assert_eq!(reply.error.unwrap().message(), "Method not found");
    }

    #[test]
    fn test_call_tool_result_payload() {
        let result: CallToolResult = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "[\"users\", \"orders\"]"}]
        }))
        .unwrap();
        assert_eq!(result.payload(), json!(["users", "orders"]));

        let result: CallToolResult = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "plain words"},
                {"type": "image", "data": "...", "mimeType": "image/png"}
            ]
        }))
        .unwrap();
        assert_eq!(result.payload(), json!("plain words"));
    }

    #[test]
    fn test_tool_call_result_shape() {
        let ok = ToolCallResult::success(json!(["a"]));
        assert_eq!(ok.to_value(), json!(["a"]));
        assert!(ok.to_value().get("error").is_none());

        let err = ToolCallResult::error("nope");
        assert_eq!(err.to_value(), json!({"error": "nope"}));
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({"error": "nope"}));
        assert_eq!(err.error_message(), Some("nope"));
    }

    #[test]
    fn test_tool_call_result_from_mapping() {
        assert!(ToolCallResult::from(json!({"error": "denied"})).is_error());
        assert!(!ToolCallResult::from(json!({"id": "doc1"})).is_error());
        assert!(!ToolCallResult::from(json!(["error"])).is_error());
    }

    #[test]
    fn test_non_string_error_is_error_variant() {
        let result = ToolCallResult::from(json!({"error": {"code": 7, "message": "denied"}}));
        assert!(result.is_error());
        assert!(result.to_value().get("error").is_some());
        assert_eq!(
            result.error_message(),
            Some(r#"{"code":7,"message":"denied"}"#)
        );

        let result = ToolCallResult::from(json!({"error": null, "items": []}));
        assert_eq!(result.error_message(), Some(UNSPECIFIED_ERROR));

        let result = ToolCallResult::from(json!({"error": "  "}));
        assert_eq!(result.error_message(), Some(UNSPECIFIED_ERROR));
    }

    #[test]
    fn test_deserialize_follows_error_key() {
        let result: ToolCallResult = serde_json::from_value(json!({"error": 5})).unwrap();
        assert_eq!(result.error_message(), Some("5"));

        let result: ToolCallResult =
            serde_json::from_value(json!({"error": {"message": "denied"}})).unwrap();
        assert!(result.is_error());

        let result: ToolCallResult = serde_json::from_value(json!({"files": []})).unwrap();
        assert_eq!(result.payload(), Some(&json!({"files": []})));
    }

    #[test]
    fn test_server_description() {
        let desc: ServerDescription = serde_json::from_value(json!({
            "name": "Firebase MCP",
            "tools": ["firestore_list_collections", {"name": "storage_list_files"}]
        }))
        .unwrap();
        assert_eq!(desc.tools.len(), 2);
        assert_eq!(desc.tools[1].name(), "storage_list_files");
    }
}
