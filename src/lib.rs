//! pocketpal: a terminal chat assistant backed by a hosted LLM with a
//! handful of small utility tools.

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;
pub mod tools;

pub use agent::Agent;
pub use config::{Config, ConfigError};
