//! Current date and time

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use serde_json::{json, Value};

use super::tool::{Tool, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

pub struct TellTimeTool;

/// e.g. `It's 03:07 PM on Monday, October 19, 2026.`
pub fn describe_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "It's {} on {}.",
        now.format("%I:%M %p"),
        now.format("%A, %B %d, %Y")
    )
}

#[async_trait]
impl Tool for TellTimeTool {
    fn name(&self) -> &str {
        "tell_time"
    }

    fn description(&self) -> &str {
        "Tell the current date and time."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(self.name(), self.description(), json!({}), &[])
    }

    async fn execute(&self, _input: &Value) -> Result<ToolResult> {
        Ok(ToolResult::success(describe_time(&Local::now())))
    }
}
