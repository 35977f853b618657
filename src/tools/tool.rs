//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm::ToolDefinition;

/// Result of executing a tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Text handed back to the model
    pub output: String,
    /// Whether the tool execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: message.into(),
            is_error: true,
        }
    }
}

/// Information about a tool invocation, shown on the console
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    /// Human-readable description of what this invocation will do
    pub action_description: String,
}

/// Trait for tools that the agent can use
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Description the model uses to decide when to call the tool
    fn description(&self) -> &str;

    /// Get the tool definition sent to the model
    fn definition(&self) -> ToolDefinition;

    /// Describe what this invocation will do
    fn get_info(&self, _input: &Value) -> ToolInfo {
        ToolInfo {
            name: self.name().to_string(),
            action_description: format!("Calling {}", self.name()),
        }
    }

    /// Execute the tool with the given input
    ///
    /// The input is a JSON value that should match the tool's input schema.
    async fn execute(&self, input: &Value) -> Result<ToolResult>;
}

/// Deserialize tool input into its typed form
pub(crate) fn parse_input<T: DeserializeOwned>(tool: &str, input: &Value) -> Result<T> {
    serde_json::from_value(input.clone())
        .map_err(|e| anyhow::anyhow!("Invalid {} input: {}", tool, e))
}

/// Render a number the way a float prints: shortest form, always with a fractional part
///
/// Very large and very small magnitudes switch to exponent form with a signed,
/// two-digit exponent (`1e+16`, `1.5e-07`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("output");
        assert_eq!(result.output, "output");
        assert!(!result.is_error);
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("error message");
        assert_eq!(result.output, "error message");
        assert!(result.is_error);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(100.0), "100.0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-40.0), "-40.0");
        assert_eq!(format_number(37.77777777777778), "37.77777777777778");
    }

    #[test]
    fn test_format_number_exponent_form() {
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1e-5), "1e-05");
        assert_eq!(format_number(1.5e-7), "1.5e-07");
        assert_eq!(format_number(-2.5e20), "-2.5e+20");
        assert_eq!(format_number(1e300), "1e+300");
        assert_eq!(format_number(1e15), "1000000000000000.0");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    }
}
