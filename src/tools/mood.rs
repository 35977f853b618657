//! Mood-based encouragement

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::tool::{parse_input, Tool, ToolInfo, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

const RESPONSES: [(&str, &str); 5] = [
    (
        "sad",
        "It's okay to feel sad sometimes 💙. Remember, this feeling will pass and you're doing your best.",
    ),
    (
        "tired",
        "You’ve done a lot today. Rest is productive too — take it easy 🌙.",
    ),
    (
        "happy",
        "That's awesome! Keep shining and spreading good vibes 🌞.",
    ),
    (
        "angry",
        "Take a deep breath. You deserve peace — not stress ❤️.",
    ),
    (
        "anxious",
        "You’re safe, you’re loved, and you’ve got this 💫.",
    ),
];

pub const DEFAULT_ENCOURAGEMENT: &str =
    "Whatever you’re feeling, it’s valid. You’re doing great 🤍.";

/// Case-insensitive lookup with a fallback for unknown moods
pub fn encouragement_for(mood: &str) -> &'static str {
    let mood = mood.trim().to_lowercase();
    RESPONSES
        .iter()
        .find(|(key, _)| *key == mood)
        .map(|(_, response)| *response)
        .unwrap_or(DEFAULT_ENCOURAGEMENT)
}

pub struct MoodEncouragementTool;

#[derive(Debug, Deserialize)]
struct MoodInput {
    mood: String,
}

#[async_trait]
impl Tool for MoodEncouragementTool {
    fn name(&self) -> &str {
        "mood_encouragement"
    }

    fn description(&self) -> &str {
        "Give encouragement based on the user's mood (sad, tired, happy, angry, anxious, or anything else)."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(
            self.name(),
            self.description(),
            json!({
                "mood": { "type": "string", "description": "How the user is feeling" }
            }),
            &["mood"],
        )
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        let mood = input.get("mood").and_then(|v| v.as_str()).unwrap_or("?");
        ToolInfo {
            name: self.name().to_string(),
            action_description: format!("Finding encouragement for '{}'", mood),
        }
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: MoodInput = parse_input(self.name(), input)?;
        Ok(ToolResult::success(encouragement_for(&input.mood)))
    }
}
