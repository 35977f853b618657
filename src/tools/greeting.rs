//! Greeting tool

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::tool::{parse_input, Tool, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

pub struct SayHelloTool;

#[derive(Debug, Deserialize)]
struct SayHelloInput {
    name: String,
}

pub fn greet(name: &str) -> String {
    format!("Hello {}! Hope you're having a wonderful day 🌟", name)
}

#[async_trait]
impl Tool for SayHelloTool {
    fn name(&self) -> &str {
        "say_hello"
    }

    fn description(&self) -> &str {
        "Greet a user by name."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(
            self.name(),
            self.description(),
            json!({
                "name": { "type": "string", "description": "Name of the person to greet" }
            }),
            &["name"],
        )
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: SayHelloInput = parse_input(self.name(), input)?;
        Ok(ToolResult::success(greet(&input.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_say_hello() {
        let result = SayHelloTool.execute(&json!({"name": "Ada"})).await.unwrap();
        assert_eq!(result.output, "Hello Ada! Hope you're having a wonderful day 🌟");
    }

    #[tokio::test]
    async fn test_missing_name() {
        assert!(SayHelloTool.execute(&json!({})).await.is_err());
    }
}
