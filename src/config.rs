//! Configuration management for pocketpal.
//!
//! Configuration is read from environment variables, after loading a local
//! `.env` file if one exists:
//! - `OPENAI_API_KEY` - Required. API key for the model provider.
//! - `OPENAI_MODEL` - Optional. Model identifier. Defaults to `gpt-4o-mini`.
//! - `OPENAI_BASE_URL` - Optional. OpenAI-compatible endpoint. Defaults to the OpenAI API.
//! - `OPENAI_MAX_TOKENS` - Optional. Response token limit. Defaults to `1024`.
//! - `OPENAI_TEMPERATURE` - Optional. Sampling temperature. Defaults to `0`.
//! - `POCKETPAL_MAX_TOOL_ITERATIONS` - Optional. Model calls allowed per turn. Defaults to `10`.
//! - `POCKETPAL_KEEP_HISTORY` - Optional. Send earlier turns with each request. Defaults to `false`.
//! - `POCKETPAL_LOG_DIR` - Optional. Directory for log files. Defaults to `logs`.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::llm::openai::DEFAULT_API_BASE;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_MAX_TOOL_ITERATIONS: usize = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider API key
    pub api_key: String,

    pub model: String,

    /// Base URL of the Chat Completions API, without the `/chat/completions` suffix
    pub base_url: String,

    pub max_tokens: u32,

    pub temperature: f32,

    /// Model calls allowed in one turn before the agent gives up
    pub max_tool_iterations: usize,

    /// Keep earlier turns in the conversation sent to the model
    pub keep_history: bool,

    pub log_dir: PathBuf,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!("Failed to load .env file: {}", e),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("OPENAI_API_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let max_tokens = parse_or("OPENAI_MAX_TOKENS", get("OPENAI_MAX_TOKENS"), DEFAULT_MAX_TOKENS)?;

        let temperature = parse_or("OPENAI_TEMPERATURE", get("OPENAI_TEMPERATURE"), 0.0f32)?;

        let max_tool_iterations = parse_or(
            "POCKETPAL_MAX_TOOL_ITERATIONS",
            get("POCKETPAL_MAX_TOOL_ITERATIONS"),
            DEFAULT_MAX_TOOL_ITERATIONS,
        )?;
        if max_tool_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "POCKETPAL_MAX_TOOL_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let keep_history = match get("POCKETPAL_KEEP_HISTORY") {
            None => false,
            Some(v) => parse_bool(&v).ok_or_else(|| {
                ConfigError::InvalidValue("POCKETPAL_KEEP_HISTORY".to_string(), v.clone())
            })?,
        };

        let log_dir = get("POCKETPAL_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Ok(Self {
            api_key,
            model,
            base_url,
            max_tokens,
            temperature,
            max_tool_iterations,
            keep_history,
            log_dir,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), v)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tool_iterations, DEFAULT_MAX_TOOL_ITERATIONS);
        assert!(!config.keep_history);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));

        let err = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-5-mini"),
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("OPENAI_MAX_TOKENS", "256"),
            ("OPENAI_TEMPERATURE", "0.5"),
            ("POCKETPAL_MAX_TOOL_ITERATIONS", "3"),
            ("POCKETPAL_KEEP_HISTORY", "Yes"),
            ("POCKETPAL_LOG_DIR", "/tmp/pp"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-5-mini");
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tool_iterations, 3);
        assert!(config.keep_history);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/pp"));
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MAX_TOKENS", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue("OPENAI_MAX_TOKENS".to_string(), "lots".to_string())
        );

        let err = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("POCKETPAL_MAX_TOOL_ITERATIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key, _) if key == "POCKETPAL_MAX_TOOL_ITERATIONS"));

        let err = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("POCKETPAL_KEEP_HISTORY", "maybe"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue("POCKETPAL_KEEP_HISTORY".to_string(), "maybe".to_string())
        );
    }
}
