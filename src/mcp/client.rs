//! Firebase MCP client
//!
//! Sends named-operation requests to the Firebase MCP server and turns every
//! outcome into a [`ToolCallResult`]. Single attempt per call, no retries.

use std::time::Duration;

use reqwest::Url;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{BridgeError, ConfigError, DecodeError, Result, ToolError, TransportError};
use crate::mcp::types::{
    CallToolResult, JsonRpcReply, JsonRpcRequest, RequestId, ServerDescription, ToolCallRequest,
    ToolCallResult, UNSPECIFIED_ERROR,
};

/// Client for the Firebase MCP server
#[derive(Debug, Clone)]
pub struct RemoteToolClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Base URL (discovery on GET, tool calls on POST)
    endpoint: Url,

    /// Per-request timeout
    timeout: Duration,
}

impl RemoteToolClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                BridgeError::Config(ConfigError::InvalidConfig {
                    message: format!("failed to build HTTP client: {}", e),
                })
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ==================== Tool Calls ====================

    /// Call a remote operation, reporting every failure as the error variant
    pub async fn call(&self, operation: &str, arguments: Map<String, Value>) -> ToolCallResult {
        match ToolCallRequest::new(operation, arguments) {
            Ok(request) => self.call_request(&request).await,
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call a remote operation from a prepared request
    pub async fn call_request(&self, request: &ToolCallRequest) -> ToolCallResult {
        match self.try_call(request).await {
            Ok(payload) => ToolCallResult::success(payload),
            Err(e) => {
                warn!(operation = %request.operation, error = %e, "Firebase MCP tool call failed");
                ToolCallResult::error(error_message(e))
            }
        }
    }

    /// Call a remote operation, returning failures as errors
    pub async fn try_call(&self, request: &ToolCallRequest) -> Result<Value> {
        let rpc = JsonRpcRequest::call_tool(RequestId::Number(1), request);
        debug!(operation = %request.operation, url = %self.endpoint, "Calling Firebase MCP tool");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&rpc)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        decode_reply(&body)
    }

    // ==================== Discovery ====================

    /// Fetch the discovery document (server name and tool list)
    pub async fn describe(&self) -> Result<ServerDescription> {
        let response = self
            .http_client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            DecodeError::InvalidBody {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Liveness check: `true` only for a success status within `timeout`
    pub async fn probe(&self, timeout: Duration) -> bool {
        match self
            .http_client
            .get(self.endpoint.clone())
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => {
                let ok = response.status().is_success();
                debug!(url = %self.endpoint, status = %response.status(), "Probed Firebase MCP server");
                ok
            }
            Err(e) => {
                debug!(url = %self.endpoint, error = %e, "Firebase MCP server probe failed");
                false
            }
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> BridgeError {
        if err.is_timeout() {
            TransportError::Timeout {
                url: self.endpoint.to_string(),
                timeout_ms: self.timeout.as_millis(),
            }
            .into()
        } else {
            TransportError::Unreachable {
                url: self.endpoint.to_string(),
                message: err.to_string(),
            }
            .into()
        }
    }
}

/// Decode a reply body into the success payload
fn decode_reply(body: &str) -> Result<Value> {
    let reply: JsonRpcReply = serde_json::from_str(body).map_err(|e| DecodeError::InvalidBody {
        message: e.to_string(),
    })?;

    if let Some(error) = reply.error {
        return Err(upstream(error.message()));
    }

    let result = reply.result.ok_or_else(|| DecodeError::InvalidBody {
        message: "reply has neither result nor error".to_string(),
    })?;

    let payload = if result.get("content").map_or(false, Value::is_array) {
        let tool_result: CallToolResult =
            serde_json::from_value(result).map_err(|e| DecodeError::InvalidBody {
                message: e.to_string(),
            })?;
        if tool_result.is_error {
            return Err(upstream(tool_result.text()));
        }
        tool_result.payload()
    } else {
        result
    };

    match ToolCallResult::from(payload) {
        ToolCallResult::Success(payload) => Ok(payload),
        ToolCallResult::Error { error } => Err(upstream(error)),
    }
}

fn upstream(message: String) -> BridgeError {
    let message = if message.trim().is_empty() {
        UNSPECIFIED_ERROR.to_string()
    } else {
        message
    };
    ToolError::Upstream { message }.into()
}

/// Message carried by the error variant; upstream messages pass through verbatim
fn error_message(err: BridgeError) -> String {
    match err {
        BridgeError::Tool(ToolError::Upstream { message }) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(uri: &str, timeout: Duration) -> RemoteToolClient {
        let mut config = Config::new(&format!("{}/mcp/", uri)).unwrap();
        config.request_timeout = timeout;
        RemoteToolClient::new(&config).unwrap()
    }

    #[test]
    fn test_decode_raw_result() {
        let payload = decode_reply(r#"{"jsonrpc":"2.0","id":1,"result":["users"]}"#).unwrap();
        assert_eq!(payload, json!(["users"]));
    }

    #[test]
    fn test_decode_error_mapping_in_result() {
        let err = decode_reply(r#"{"result":{"error":"Document not found"}}"#).unwrap_err();
        assert_eq!(error_message(err), "Document not found");
    }

    #[tokio::test]
    async fn test_call_structured_error_in_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"error": {"code": 7, "message": "denied"}}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.call("auth_get_user", Map::new()).await;

        assert!(result.is_error());
        assert!(result.error_message().unwrap().contains("denied"));
        assert!(result.to_value().get("error").is_some());
    }

    #[test]
    fn test_decode_null_error_in_result() {
        let err = decode_reply(r#"{"result":{"error":null}}"#).unwrap_err();
        assert_eq!(error_message(err), UNSPECIFIED_ERROR);
    }

    #[test]
    fn test_decode_missing_members() {
        let err = decode_reply(r#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_call_success_with_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/mcp/"))
            .and(body_partial_json(json!({
                "method": "tools/call",
                "params": {"name": "firestore_list_collections", "arguments": {}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"content": [{"type": "text", "text": "[\"users\",\"orders\"]"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.call("firestore_list_collections", Map::new()).await;

        assert_eq!(result, ToolCallResult::success(json!(["users", "orders"])));
    }

    #[tokio::test]
    async fn test_call_rpc_error_is_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32601, "message": "Unknown tool: firestore_explode"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.call("firestore_explode", Map::new()).await;

        assert_eq!(result.error_message(), Some("Unknown tool: firestore_explode"));
    }

    #[tokio::test]
    async fn test_call_is_error_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "content": [{"type": "text", "text": "Invalid collection name"}],
                    "isError": true
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.call("firestore_list_documents", Map::new()).await;

        assert_eq!(result.error_message(), Some("Invalid collection name"));
    }

    #[tokio::test]
    async fn test_call_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.call("storage_list_files", Map::new()).await;

        let message = result.error_message().unwrap();
        assert!(message.contains("500"));
        assert!(message.contains("internal failure"));
    }

    #[tokio::test]
    async fn test_call_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.call("storage_list_files", Map::new()).await;

        assert!(result.error_message().unwrap().contains("Invalid response body"));
    }

    #[tokio::test]
    async fn test_call_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": []}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_millis(200));
        let started = Instant::now();
        let result = client.call("firestore_list_collections", Map::new()).await;

        assert!(result.is_error());
        assert!(result.error_message().unwrap().contains("timed out"));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_call_unreachable() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = client_for(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2));
        let result = client.call("firestore_list_collections", Map::new()).await;

        assert!(result.error_message().unwrap().contains("unreachable"));
    }

    #[tokio::test]
    async fn test_call_empty_operation() {
        let client = client_for("http://127.0.0.1:1", Duration::from_secs(1));
        let result = client.call("", Map::new()).await;
        assert!(result.error_message().unwrap().contains("operation"));
    }

    #[tokio::test]
    async fn test_describe_and_probe() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcp/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Firebase MCP Server",
                "tools": ["firestore_list_collections", "storage_list_files"]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let description = client.describe().await.unwrap();
        assert_eq!(description.name, "Firebase MCP Server");
        assert_eq!(description.tools.len(), 2);

        assert!(client.probe(Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_probe_non_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        assert!(!client.probe(Duration::from_secs(1)).await);
    }
}
