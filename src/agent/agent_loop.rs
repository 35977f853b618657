//! Agent loop with tool calling support
//!
//! A turn streams a model response, runs any tools the model asks for and
//! feeds their results back, until the model ends the turn or the
//! iteration limit is reached.

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

use crate::cli::{Console, Dispatcher};
use crate::config::{Config, DEFAULT_MAX_TOOL_ITERATIONS};
use crate::llm::{
    ContentBlock, LlmProvider, Message, MessageResponse, ResponseAccumulator, StopReason,
    StreamEvent, ToolChoice, ToolDefinition,
};
use crate::tools::ToolRegistry;

use super::system_prompt::SYSTEM_PROMPT;

/// What happened during one turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnSummary {
    /// All assistant text printed during the turn
    pub text: String,
    /// Names of the tools executed, in call order
    pub tool_calls: Vec<String>,
    /// Number of model calls made
    pub iterations: usize,
    /// The iteration limit ended the turn
    pub hit_iteration_limit: bool,
}

/// Main agent that orchestrates a conversation turn
pub struct Agent {
    console: Console,
    llm_provider: Arc<dyn LlmProvider>,
    tool_registry: ToolRegistry,
    system_prompt: String,
    max_tool_iterations: usize,
    keep_history: bool,
    history: Vec<Message>,
}

impl Agent {
    pub fn new(console: Console, llm_provider: Arc<dyn LlmProvider>, tool_registry: ToolRegistry) -> Self {
        tracing::info!(
            "Creating agent with {} tools on {} ({})",
            tool_registry.len(),
            llm_provider.provider_name(),
            llm_provider.model()
        );

        Self {
            console,
            llm_provider,
            tool_registry,
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
            keep_history: false,
            history: Vec::new(),
        }
    }

    /// Apply the loop settings from configuration
    pub fn with_config(self, config: &Config) -> Self {
        self.with_max_tool_iterations(config.max_tool_iterations)
            .with_history(config.keep_history)
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_tool_iterations(mut self, max: usize) -> Self {
        self.max_tool_iterations = max.max(1);
        self
    }

    /// Keep completed turns and send them with later requests
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Process a single user turn (may involve multiple tool calls)
    pub async fn process_turn(&mut self, user_message: &str) -> Result<TurnSummary> {
        tracing::debug!("Processing turn: {}", user_message);

        let mut messages: Vec<Message> = if self.keep_history {
            self.history.clone()
        } else {
            Vec::new()
        };
        messages.push(Message::user(user_message));

        let tools = self.tool_registry.get_definitions();
        let mut summary = TurnSummary::default();

        loop {
            if summary.iterations >= self.max_tool_iterations {
                tracing::warn!("Maximum tool iterations reached");
                self.console.println();
                self.console
                    .print_system("Maximum tool iterations reached. Stopping.");
                summary.hit_iteration_limit = true;
                break;
            }
            summary.iterations += 1;

            let response = self.stream_response(&messages, tools.clone()).await?;
            tracing::info!(
                "Response {}: stop_reason={:?}, {} blocks, usage in={} out={}",
                summary.iterations,
                response.stop_reason,
                response.content.len(),
                response.usage.input_tokens,
                response.usage.output_tokens
            );
            summary.text.push_str(&response.text());

            if !response.content.is_empty() {
                messages.push(Message::assistant_with_blocks(response.content.clone()));
            }

            // Tool calls drive the loop; some compatible servers report "stop" with them
            if !response.has_tool_use() {
                if response.stop_reason == Some(StopReason::MaxTokens) {
                    tracing::warn!("Response truncated at max tokens");
                }
                break;
            }

            let tool_results = self.run_tools(&response, &mut summary).await;
            messages.push(Message::user_with_blocks(tool_results));
        }

        if self.keep_history {
            self.history = messages;
        }

        Ok(summary)
    }

    /// Stream one model response, printing text as it arrives
    async fn stream_response(
        &self,
        messages: &[Message],
        tools: Vec<ToolDefinition>,
    ) -> Result<MessageResponse> {
        let mut stream = self
            .llm_provider
            .stream_with_tools(
                messages.to_vec(),
                Some(self.system_prompt.as_str()),
                tools,
                Some(ToolChoice::auto()),
            )
            .await?;

        let mut accumulator = ResponseAccumulator::new();
        while let Some(event) = stream.next().await {
            let event = event?;
            if let StreamEvent::TextDelta { ref text } = event {
                self.console.print_assistant_chunk(text);
            }
            accumulator.push(&event);
        }

        Ok(accumulator.finish())
    }

    /// Execute every tool call in a response, in order
    async fn run_tools(
        &self,
        response: &MessageResponse,
        summary: &mut TurnSummary,
    ) -> Vec<ContentBlock> {
        let mut tool_results = Vec::new();

        for block in &response.content {
            let ContentBlock::ToolUse { id, name, input } = block else {
                continue;
            };
            tracing::info!("Tool use requested: {} ({})", name, id);

            let action = self
                .tool_registry
                .get_tool_info(name, input)
                .map(|info| info.action_description)
                .unwrap_or_else(|| format!("Calling {}", name));
            self.console.print_tool_action(name, &action);

            let result = match self.tool_registry.execute(name, input).await {
                Ok(result) => {
                    self.console.print_tool_result(&result.output, result.is_error);
                    ContentBlock::tool_result(id.clone(), result.output, result.is_error)
                }
                Err(e) => {
                    tracing::warn!("Tool {} failed: {}", name, e);
                    let error_msg = format!("Tool execution failed: {}", e);
                    self.console.print_tool_result(&error_msg, true);
                    ContentBlock::tool_result(id.clone(), error_msg, true)
                }
            };

            summary.tool_calls.push(name.clone());
            tool_results.push(result);
        }

        tool_results
    }
}

#[async_trait]
impl Dispatcher for Agent {
    async fn dispatch(&mut self, input: &str) -> Result<()> {
        self.process_turn(input).await.map(|_| ())
    }
}
