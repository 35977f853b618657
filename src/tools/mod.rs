//! Tool system for the assistant
//!
//! This module provides the Tool trait, the ToolRegistry, and the small
//! utility tools the model can call.

pub mod arithmetic;
pub mod chance;
pub mod clock;
pub mod greeting;
pub mod mood;
mod registry;
pub mod sayings;
pub mod timer;
mod tool;
pub mod units;
pub mod weather;

pub use arithmetic::CalculatorTool;
pub use chance::{CoinTossTool, DiceRollTool};
pub use clock::TellTimeTool;
pub use greeting::SayHelloTool;
pub use mood::MoodEncouragementTool;
pub use registry::ToolRegistry;
pub use sayings::{JokeTool, QuoteTool};
pub use timer::TimerTool;
pub use tool::{format_number, Tool, ToolInfo, ToolResult};
pub use units::UnitConverterTool;
pub use weather::WeatherTool;

/// Registry with every built-in tool
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(CalculatorTool);
    registry.register(SayHelloTool);
    registry.register(TellTimeTool);
    registry.register(WeatherTool);
    registry.register(JokeTool);
    registry.register(QuoteTool);
    registry.register(CoinTossTool);
    registry.register(DiceRollTool);
    registry.register(MoodEncouragementTool);
    registry.register(UnitConverterTool);
    registry.register(TimerTool::new());
    registry
}
