//! Jokes and quotes

use anyhow::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

use super::tool::{Tool, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

pub const JOKES: [&str; 4] = [
    "Why don’t skeletons fight each other? They don’t have the guts.",
    "Why do Java developers wear glasses? Because they don’t C#!",
    "Why did the computer show up at work late? It had a hard drive.",
    "Parallel lines have so much in common... it’s a shame they’ll never meet.",
];

pub const QUOTES: [&str; 5] = [
    "Believe you can and you're halfway there.",
    "You are stronger than you think.",
    "The best time to start was yesterday. The next best time is now.",
    "Keep going — every step counts.",
    "Do what you can, with what you have, where you are.",
];

fn pick<R: Rng + ?Sized>(items: &[&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

pub struct JokeTool;

#[async_trait]
impl Tool for JokeTool {
    fn name(&self) -> &str {
        "tell_joke"
    }

    fn description(&self) -> &str {
        "Tells a random light-hearted joke."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(self.name(), self.description(), json!({}), &[])
    }

    async fn execute(&self, _input: &Value) -> Result<ToolResult> {
        Ok(ToolResult::success(pick(&JOKES, &mut rand::thread_rng())))
    }
}

pub struct QuoteTool;

#[async_trait]
impl Tool for QuoteTool {
    fn name(&self) -> &str {
        "quote_generator"
    }

    fn description(&self) -> &str {
        "Returns a random inspirational quote."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(self.name(), self.description(), json!({}), &[])
    }

    async fn execute(&self, _input: &Value) -> Result<ToolResult> {
        Ok(ToolResult::success(pick(&QUOTES, &mut rand::thread_rng())))
    }
}
