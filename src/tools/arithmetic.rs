//! Calculator tool

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::tool::{format_number, parse_input, Tool, ToolInfo, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

/// Adds two numbers
pub struct CalculatorTool;

#[derive(Debug, Deserialize)]
struct CalculatorInput {
    a: f64,
    b: f64,
}

pub fn add(a: f64, b: f64) -> String {
    format!(
        "The sum of {} and {} is {}.",
        format_number(a),
        format_number(b),
        format_number(a + b)
    )
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform basic arithmetic calculations: adds two numbers a and b."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(
            self.name(),
            self.description(),
            json!({
                "a": { "type": "number", "description": "First operand" },
                "b": { "type": "number", "description": "Second operand" }
            }),
            &["a", "b"],
        )
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        let operand = |key: &str| {
            input
                .get(key)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "?".to_string())
        };
        ToolInfo {
            name: self.name().to_string(),
            action_description: format!("Adding {} + {}", operand("a"), operand("b")),
        }
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: CalculatorInput = parse_input(self.name(), input)?;
        Ok(ToolResult::success(add(input.a, input.b)))
    }
}
