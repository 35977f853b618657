//! Tool registry
//!
//! Holds the tools advertised to the model and dispatches calls by name.

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

use super::tool::{Tool, ToolInfo, ToolResult};
use crate::llm::ToolDefinition;

/// Registry of available tools, in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        tracing::debug!("Registering tool: {}", tool.name());
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(pos) => self.tools[pos] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool definitions to send to the model
    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn get_tool_info(&self, name: &str, input: &Value) -> Option<ToolInfo> {
        self.get(name).map(|t| t.get_info(input))
    }

    /// Execute a tool by name
    ///
    /// An unknown name yields an error result rather than failing; input
    /// validation errors from the tool are propagated.
    pub async fn execute(&self, name: &str, input: &Value) -> Result<ToolResult> {
        match self.get(name) {
            Some(tool) => {
                tracing::info!("Executing tool: {}", name);
                tracing::debug!("Tool input: {}", input);
                let result = tool.execute(input).await?;
                tracing::debug!("Tool output: {}", result.output);
                Ok(result)
            }
            None => {
                tracing::warn!("Model requested unknown tool: {}", name);
                Ok(ToolResult::error(format!("Unknown tool: {}", name)))
            }
        }
    }
}
