//! Remote Firebase tools
//!
//! One wrapper per Firebase MCP operation. A wrapper validates its arguments
//! locally and hands the server's result back untouched.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::mcp::client::RemoteToolClient;
use crate::mcp::types::ToolCallResult;
use crate::tools::catalog::{catalog, ToolSpec};
use crate::tools::registry::{Tool, ToolRegistry};

/// Tool backed by a Firebase MCP operation of the same name
pub struct RemoteTool {
    spec: ToolSpec,
    schema: Value,
    client: Arc<RemoteToolClient>,
}

impl RemoteTool {
    pub fn new(spec: ToolSpec, client: Arc<RemoteToolClient>) -> Self {
        Self {
            schema: spec.input_schema(),
            spec,
            client,
        }
    }
}

#[async_trait]
impl Tool for RemoteTool {
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
        let arguments = match self.spec.shape_arguments(arguments) {
            Ok(arguments) => arguments,
            Err(e) => return ToolCallResult::error(e.to_string()),
        };

        debug!(tool = self.spec.name, "Invoking remote Firebase tool");
        self.client.call(self.spec.name, arguments).await
    }
}

/// Registry holding a remote wrapper for every Firebase operation
pub fn remote_tools(client: Arc<RemoteToolClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for spec in catalog() {
        registry.register(RemoteTool::new(spec, client.clone()));
    }
    registry
}
