//! Mock weather report

use anyhow::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};

use super::tool::{parse_input, Tool, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

pub const CONDITIONS: [&str; 6] = ["sunny", "rainy", "cloudy", "stormy", "foggy", "clear"];

/// Reported temperatures fall in this range, in °C
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<i32> = 20..=35;

/// Made-up weather; no forecast service is consulted
pub struct WeatherTool;

#[derive(Debug, Deserialize)]
struct WeatherInput {
    city: String,
}

pub fn weather_report<R: Rng + ?Sized>(city: &str, rng: &mut R) -> String {
    let condition = CONDITIONS.choose(rng).copied().unwrap_or("clear");
    let temp = rng.gen_range(TEMPERATURE_RANGE);
    format!("The weather in {} is {} with about {}°C.", city, condition, temp)
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Mock weather report for a city, just for fun."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(
            self.name(),
            self.description(),
            json!({
                "city": { "type": "string", "description": "City to report on" }
            }),
            &["city"],
        )
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: WeatherInput = parse_input(self.name(), input)?;
        let report = weather_report(&input.city, &mut rand::thread_rng());
        Ok(ToolResult::success(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_report_stays_in_domain() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let report = weather_report("Lisbon", &mut rng);
            let rest = report
                .strip_prefix("The weather in Lisbon is ")
                .expect("prefix");
            let (condition, rest) = rest.split_once(" with about ").expect("separator");
            assert!(CONDITIONS.contains(&condition), "condition {}", condition);
            let temp: i32 = rest.strip_suffix("°C.").expect("suffix").parse().unwrap();
            assert!(TEMPERATURE_RANGE.contains(&temp), "temp {}", temp);
        }
    }
}
