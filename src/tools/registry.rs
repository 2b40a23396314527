//! Tool registry
//!
//! Every tool implements [`Tool`] (name / description / schema / invoke). The
//! registry keeps registration order so the set can be listed for a hosting
//! framework, and any single tool can be fetched and invoked on its own.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::mcp::types::{ToolCallResult, ToolDefinition};

/// A named, independently invocable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;

    /// Tool description (for the hosting agent)
    fn description(&self) -> &str;

    /// Argument JSON Schema
    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    /// Run the tool
    async fn invoke(&self, arguments: Value) -> ToolCallResult;

    /// Definition for registration with a hosting framework
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: Some(self.description().to_string()),
            input_schema: self.input_schema(),
        }
    }
}

/// Ordered set of tools, looked up by name
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; a tool with the same name is replaced in place
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&position) => self.tools[position] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&position| self.tools[position].clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Invoke a tool by name; unknown names yield the error variant
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolCallResult {
        match self.get(name) {
            Some(tool) => tool.invoke(arguments).await,
            None => ToolCallResult::error(
                ToolError::UnknownTool {
                    name: name.to_string(),
                }
                .to_string(),
            ),
        }
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Definitions in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(&'static str);

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Echo the arguments back"
        }

        async fn invoke(&self, arguments: Value) -> ToolCallResult {
            ToolCallResult::success(arguments)
        }
    }

    #[tokio::test]
    async fn test_register_and_invoke() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("first"));
        registry.register(Echo("second"));

        assert_eq!(registry.names(), vec!["first", "second"]);
        assert_eq!(registry.len(), 2);

        let result = registry.invoke("second", json!({"k": 1})).await;
        assert_eq!(result.payload(), Some(&json!({"k": 1})));

        let tool = registry.get("first").unwrap();
        assert_eq!(tool.invoke(json!([])).await, ToolCallResult::success(json!([])));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let result = registry.invoke("missing", json!({})).await;
        assert_eq!(result.error_message(), Some("Unknown tool: missing"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("a"));
        registry.register(Echo("b"));
        registry.register(Echo("a"));

        assert_eq!(registry.names(), vec!["a", "b"]);
        let definitions = registry.definitions();
        assert_eq!(definitions[0].description.as_deref(), Some("Echo the arguments back"));
        assert_eq!(definitions[0].input_schema["type"], "object");
    }
}
