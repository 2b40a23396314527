//! Local fallback tools
//!
//! Stand-ins used while the Firebase MCP server is unreachable. They accept
//! the same names and arguments as the remote tools, never touch the network
//! and answer with a fixed "not executed" payload.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::mcp::types::ToolCallResult;
use crate::tools::catalog::{catalog, ToolSpec};
use crate::tools::registry::{Tool, ToolRegistry};

/// Deterministic local tool answering for a Firebase operation
pub struct FallbackTool {
    spec: ToolSpec,
    schema: Value,
}

impl FallbackTool {
    pub fn new(spec: ToolSpec) -> Self {
        Self {
            schema: spec.input_schema(),
            spec,
        }
    }
}

#[async_trait]
impl Tool for FallbackTool {
    fn name(&self) -> &str {
        self.spec.name
    }

    fn description(&self) -> &str {
        self.spec.description
    }

    fn input_schema(&self) -> Value {
        self.schema.clone()
    }

    async fn invoke(&self, arguments: Value) -> ToolCallResult {
        match self.spec.shape_arguments(arguments) {
            Ok(arguments) => ToolCallResult::success(json!({
                "offline": true,
                "tool": self.spec.name,
                "arguments": arguments,
                "message": format!(
                    "Firebase MCP server is not available; {} was not executed",
                    self.spec.name
                ),
            })),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}

/// Registry holding a fallback tool for every Firebase operation
pub fn fallback_tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for spec in catalog() {
        registry.register(FallbackTool::new(spec));
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::names;

    #[test]
    fn test_same_names_as_remote() {
        assert_eq!(fallback_tools().names(), names::ALL.to_vec());
    }

    #[test]
    fn test_offline_payload_is_deterministic() {
        let registry = fallback_tools();
        let args = json!({"collection": "users", "limit": 5});

        let first = tokio_test::block_on(registry.invoke(names::FIRESTORE_LIST_DOCUMENTS, args.clone()));
        let second = tokio_test::block_on(registry.invoke(names::FIRESTORE_LIST_DOCUMENTS, args));
        assert_eq!(first, second);

        let payload = first.payload().unwrap();
        assert_eq!(payload["offline"], true);
        assert_eq!(payload["tool"], names::FIRESTORE_LIST_DOCUMENTS);
        assert_eq!(payload["arguments"]["limit"], 5);
    }

    #[test]
    fn test_invalid_arguments_still_rejected() {
        let registry = fallback_tools();
        let result = tokio_test::block_on(registry.invoke(names::AUTH_GET_USER, json!({})));
        assert!(result.is_error());
    }
}
