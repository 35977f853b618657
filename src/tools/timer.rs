//! Countdown timer
//!
//! Holds up the current turn until the countdown finishes. There is no
//! cancellation.

use anyhow::Result;
use async_trait::async_trait;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Write;
use std::time::Duration;

use super::tool::{parse_input, Tool, ToolInfo, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

pub const TIMES_UP: &str = "⏰ Time’s up!";

pub struct TimerTool {
    tick: Duration,
}

#[derive(Debug, Deserialize)]
struct TimerInput {
    #[serde(deserialize_with = "whole_seconds")]
    seconds: u64,
}

/// Accept `5` as well as `5.0`; fractions and negatives are rejected
fn whole_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(de::Error::custom(format!(
            "expected a whole number of seconds, got {}",
            number
        ))),
    }
}

impl TimerTool {
    pub fn new() -> Self {
        Self {
            tick: Duration::from_secs(1),
        }
    }

    /// Use a different length for each counted "second"
    pub fn with_tick(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for TimerTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Count down from `seconds`, reporting each remaining value before sleeping
pub async fn countdown<F>(seconds: u64, tick: Duration, mut on_tick: F)
where
    F: FnMut(u64),
{
    for remaining in (1..=seconds).rev() {
        on_tick(remaining);
        tokio::time::sleep(tick).await;
    }
}

#[async_trait]
impl Tool for TimerTool {
    fn name(&self) -> &str {
        "timer"
    }

    fn description(&self) -> &str {
        "Start a simple countdown timer for a number of seconds."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(
            self.name(),
            self.description(),
            json!({
                "seconds": { "type": "integer", "minimum": 0, "description": "Length of the countdown in seconds" }
            }),
            &["seconds"],
        )
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        let seconds = input
            .get("seconds")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string());
        ToolInfo {
            name: self.name().to_string(),
            action_description: format!("Starting a {}-second timer", seconds),
        }
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: TimerInput = parse_input(self.name(), input)?;
        tracing::info!("Timer started for {}s", input.seconds);

        countdown(input.seconds, self.tick, |remaining| {
            print!("⏳ {} seconds left...   \r", remaining);
            let _ = std::io::stdout().flush();
        })
        .await;
        if input.seconds > 0 {
            println!();
        }

        tracing::info!("Timer finished");
        Ok(ToolResult::success(TIMES_UP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_countdown_reports_each_second() {
        let mut ticks = Vec::new();
        countdown(3, Duration::ZERO, |n| ticks.push(n)).await;
        assert_eq!(ticks, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_zero_seconds_finishes_immediately() {
        let result = TimerTool::new().execute(&json!({"seconds": 0})).await.unwrap();
        assert_eq!(result.output, TIMES_UP);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_waits_for_its_duration() {
        let started = tokio::time::Instant::now();
        let result = TimerTool::new().execute(&json!({"seconds": 5})).await.unwrap();
        assert_eq!(result.output, TIMES_UP);
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_negative_seconds_rejected() {
        assert!(TimerTool::new().execute(&json!({"seconds": -2})).await.is_err());
    }

    #[test]
    fn test_times_up_text_is_exact() {
        assert_eq!(TIMES_UP, "⏰ Time’s up!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_whole_float_seconds_accepted() {
        let started = tokio::time::Instant::now();
        let result = TimerTool::new().execute(&json!({"seconds": 2.0})).await.unwrap();
        assert_eq!(result.output, TIMES_UP);
        assert!(started.elapsed() >= Duration::from_secs(2));

        let result = TimerTool::new().execute(&json!({"seconds": 0.0})).await.unwrap();
        assert_eq!(result.output, TIMES_UP);
    }

    #[tokio::test]
    async fn test_fractional_seconds_rejected() {
        let err = TimerTool::new()
            .execute(&json!({"seconds": 2.5}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("whole number of seconds"));
        assert!(TimerTool::new().execute(&json!({"seconds": -1.0})).await.is_err());
        assert!(TimerTool::new().execute(&json!({"seconds": "5"})).await.is_err());
    }
}
