pub mod agent_loop;
pub mod system_prompt;

pub use agent_loop::{Agent, TurnSummary};
pub use system_prompt::{default_system_prompt, SYSTEM_PROMPT};
