//! Unit converter
//!
//! Only eight explicit unit pairs are known; everything else gets
//! [`UNSUPPORTED`].

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::tool::{format_number, parse_input, Tool, ToolInfo, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

pub const UNSUPPORTED: &str = "Sorry, I can't convert between those units yet.";

pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> String {
    let from = from_unit.trim().to_lowercase();
    let to = to_unit.trim().to_lowercase();
    let v = format_number(value);

    let linear = |factor: f64, divide: bool| {
        let result = if divide { value / factor } else { value * factor };
        format!("{} {} = {} {}", v, from, format_number(result), to)
    };

    match (from.as_str(), to.as_str()) {
        ("cm", "m") => linear(100.0, true),
        ("m", "cm") => linear(100.0, false),
        ("m", "km") => linear(1000.0, true),
        ("km", "m") => linear(1000.0, false),
        ("g", "kg") => linear(1000.0, true),
        ("kg", "g") => linear(1000.0, false),
        ("c", "f") => format!("{}°C = {}°F", v, format_number(value * 9.0 / 5.0 + 32.0)),
        ("f", "c") => format!("{}°F = {}°C", v, format_number((value - 32.0) * 5.0 / 9.0)),
        _ => UNSUPPORTED.to_string(),
    }
}

pub struct UnitConverterTool;

#[derive(Debug, Deserialize)]
struct ConvertInput {
    value: f64,
    from_unit: String,
    to_unit: String,
}

#[async_trait]
impl Tool for UnitConverterTool {
    fn name(&self) -> &str {
        "unit_converter"
    }

    fn description(&self) -> &str {
        "Convert between cm/m/km, g/kg, and °C/°F. Use 'c' and 'f' for temperatures."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(
            self.name(),
            self.description(),
            json!({
                "value": { "type": "number", "description": "Value to convert" },
                "from_unit": { "type": "string", "description": "Unit to convert from: cm, m, km, g, kg, c or f" },
                "to_unit": { "type": "string", "description": "Unit to convert to: cm, m, km, g, kg, c or f" }
            }),
            &["value", "from_unit", "to_unit"],
        )
    }

    fn get_info(&self, input: &Value) -> ToolInfo {
        let field = |key: &str| {
            input
                .get(key)
                .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
                .unwrap_or_else(|| "?".to_string())
        };
        ToolInfo {
            name: self.name().to_string(),
            action_description: format!(
                "Converting {} {} to {}",
                field("value"),
                field("from_unit"),
                field("to_unit")
            ),
        }
    }

    async fn execute(&self, input: &Value) -> Result<ToolResult> {
        let input: ConvertInput = parse_input(self.name(), input)?;
        Ok(ToolResult::success(convert(
            input.value,
            &input.from_unit,
            &input.to_unit,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_pairs() {
        assert_eq!(convert(100.0, "cm", "m"), "100.0 cm = 1.0 m");
        assert_eq!(convert(2.5, "m", "cm"), "2.5 m = 250.0 cm");
        assert_eq!(convert(1500.0, "m", "km"), "1500.0 m = 1.5 km");
        assert_eq!(convert(3.0, "km", "m"), "3.0 km = 3000.0 m");
        assert_eq!(convert(250.0, "g", "kg"), "250.0 g = 0.25 kg");
        assert_eq!(convert(2.0, "kg", "g"), "2.0 kg = 2000.0 g");
        assert_eq!(convert(0.0, "c", "f"), "0.0°C = 32.0°F");
        assert_eq!(convert(100.0, "C", "F"), "100.0°C = 212.0°F");
        assert_eq!(convert(212.0, "f", "c"), "212.0°F = 100.0°C");
        assert_eq!(convert(-40.0, "f", "c"), "-40.0°F = -40.0°C");
        assert_eq!(convert(100.0, "f", "c"), "100.0°F = 37.77777777777778°C");
    }

    #[test]
    fn test_units_are_case_insensitive() {
        assert_eq!(convert(100.0, "CM", " M "), "100.0 cm = 1.0 m");
    }

    #[test]
    fn test_unsupported_pairs() {
        for (from, to) in [
            ("cm", "km"),
            ("km", "cm"),
            ("g", "lb"),
            ("m", "m"),
            ("celsius", "fahrenheit"),
            ("", ""),
            ("kg", "m"),
        ] {
            assert_eq!(convert(1.0, from, to), UNSUPPORTED, "{} -> {}", from, to);
        }
    }

    #[tokio::test]
    async fn test_execute_rejects_non_numeric_value() {
        let err = UnitConverterTool
            .execute(&json!({"value": "ten", "from_unit": "cm", "to_unit": "m"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid unit_converter input"));
    }
}
