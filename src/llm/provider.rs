//! LLM provider trait
//!
//! The agent talks to the model only through this trait, so the hosted
//! backend can be swapped (or scripted in tests).

use anyhow::Result;
use futures::stream::Stream;
use std::pin::Pin;

use super::types::{Message, MessageResponse, StreamEvent, ToolChoice, ToolDefinition};

/// Boxed stream of response events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>;

#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation and wait for the complete response
    async fn send_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
        tool_choice: Option<ToolChoice>,
    ) -> Result<MessageResponse>;

    /// Send the conversation and stream the response as it is generated
    async fn stream_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
        tool_choice: Option<ToolChoice>,
    ) -> Result<EventStream>;

    /// Model identifier used for requests
    fn model(&self) -> String;

    fn provider_name(&self) -> &str;
}
