//! OpenAI API client
//!
//! This module provides a direct HTTP client for the OpenAI Chat Completions API,
//! translating between the crate's message types and the OpenAI API format.
//! Any OpenAI-compatible endpoint works by pointing `base_url` at it.
//!
//! ```ignore
//! let llm = OpenAiProvider::new("sk-...").with_model("gpt-4o-mini");
//! ```

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use super::provider::{EventStream, LlmProvider};
use super::types::{
    ContentBlock, Message, MessageContent, MessageResponse, StopReason, StreamEvent, ToolChoice,
    ToolDefinition, Usage,
};
use crate::config::Config;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

// ============================================================================
// OpenAI-specific request/response types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<OpenAiToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_options: Option<OpenAiStreamOptions>,
}

#[derive(Debug, Serialize)]
struct OpenAiStreamOptions {
    include_usage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAiMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAiFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiFunctionCall {
    name: String,
    arguments: String, // JSON string
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAiFunctionDefinition,
}

#[derive(Debug, Serialize)]
struct OpenAiFunctionDefinition {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: Value,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OpenAiToolChoice {
    Mode(String), // "auto", "none", "required"
    Function { r#type: String, function: OpenAiFunctionChoice },
}

#[derive(Debug, Serialize)]
struct OpenAiFunctionChoice {
    name: String,
}

// Response types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    id: String,
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl From<OpenAiUsage> for Usage {
    fn from(u: OpenAiUsage) -> Self {
        Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        }
    }
}

// Streaming types

#[derive(Debug, Deserialize)]
struct OpenAiStreamChunk {
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiStreamChoice {
    delta: OpenAiDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAiToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiToolCallDelta {
    index: u32,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<OpenAiFunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct OpenAiFunctionDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

// ============================================================================
// SSE translation
// ============================================================================

/// What a single SSE line means for the stream
#[derive(Debug, PartialEq)]
enum SseLine<'a> {
    Data(&'a str),
    Done,
    Skip,
}

fn classify_sse_line(line: &str) -> SseLine<'_> {
    let Some(data) = line.strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim();
    if data == "[DONE]" {
        SseLine::Done
    } else if data.is_empty() {
        SseLine::Skip
    } else {
        SseLine::Data(data)
    }
}

/// Turns OpenAI stream chunks into [`StreamEvent`]s
///
/// Usage arrives in a trailing chunk with no choices when
/// `include_usage` is set, so the finish reason is held until the
/// stream ends.
#[derive(Debug, Default)]
struct ChunkTranslator {
    started: bool,
    seen_tool_calls: HashSet<u32>,
    stop_reason: Option<StopReason>,
    usage: Option<Usage>,
}

impl ChunkTranslator {
    fn translate(&mut self, chunk: OpenAiStreamChunk) -> Vec<StreamEvent> {
        let mut events = Vec::new();

        if !self.started {
            events.push(StreamEvent::MessageStart {
                id: chunk.id.clone(),
                model: chunk.model.clone(),
            });
            self.started = true;
        }

        if let Some(usage) = chunk.usage {
            self.usage = Some(usage.into());
        }

        for choice in chunk.choices {
            if let Some(content) = choice.delta.content {
                if !content.is_empty() {
                    events.push(StreamEvent::TextDelta { text: content });
                }
            }

            for tool_delta in choice.delta.tool_calls.unwrap_or_default() {
                let index = tool_delta.index;
                let function = tool_delta.function;

                if self.seen_tool_calls.insert(index) {
                    let name = function
                        .as_ref()
                        .and_then(|f| f.name.clone())
                        .unwrap_or_default();
                    events.push(StreamEvent::ToolUseStart {
                        index,
                        id: tool_delta.id.unwrap_or_else(|| format!("call_{}", index)),
                        name,
                    });
                }

                if let Some(args) = function.and_then(|f| f.arguments) {
                    if !args.is_empty() {
                        events.push(StreamEvent::ToolInputDelta {
                            index,
                            partial_json: args,
                        });
                    }
                }
            }

            if let Some(reason) = choice.finish_reason {
                tracing::info!("[OpenAI] Stream: finish_reason={}", reason);
                self.stop_reason = Some(StopReason::from_finish_reason(&reason));
            }
        }

        events
    }

    fn finish(&mut self) -> Vec<StreamEvent> {
        vec![
            StreamEvent::MessageDelta {
                stop_reason: self.stop_reason.take(),
                usage: self.usage.take(),
            },
            StreamEvent::MessageStop,
        ]
    }
}

// ============================================================================
// OpenAiProvider
// ============================================================================

/// OpenAI LLM provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    api_base: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with a specific API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: crate::config::DEFAULT_MODEL.to_string(),
            max_tokens: crate::config::DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a provider from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        tracing::info!("Creating OpenAI provider");
        tracing::info!("Using model: {}", config.model);
        tracing::info!("Max tokens: {}", config.max_tokens);
        if config.base_url != DEFAULT_API_BASE {
            tracing::info!("Using custom base URL: {}", config.base_url);
        }

        Self::new(config.api_key.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature)
            .with_base_url(config.base_url.clone())
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the max tokens for responses
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Point at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Reasoning models (o-series, gpt-5.x) use max_completion_tokens and reject temperature
    fn is_reasoning_model(&self) -> bool {
        self.model.starts_with("o1-") || self.model.starts_with("o3-") || self.model.starts_with("gpt-5")
    }

    // ========================================================================
    // Format conversion: internal -> OpenAI
    // ========================================================================

    /// Convert internal messages to OpenAI format
    fn convert_messages(&self, messages: &[Message], system_prompt: Option<&str>) -> Vec<OpenAiMessage> {
        let mut openai_messages: Vec<OpenAiMessage> = Vec::new();

        if let Some(system) = system_prompt {
            openai_messages.push(OpenAiMessage::text("system", system));
        }

        for msg in messages {
            match &msg.content {
                MessageContent::Text(text) => {
                    openai_messages.push(OpenAiMessage::text(&msg.role, text.clone()));
                }
                MessageContent::Blocks(blocks) => {
                    self.convert_blocks_to_messages(blocks, &msg.role, &mut openai_messages);
                }
            }
        }

        openai_messages
    }

    /// Convert content blocks to OpenAI messages
    fn convert_blocks_to_messages(
        &self,
        blocks: &[ContentBlock],
        role: &str,
        openai_messages: &mut Vec<OpenAiMessage>,
    ) {
        let mut text_parts: Vec<String> = Vec::new();
        let mut tool_calls: Vec<OpenAiToolCall> = Vec::new();
        let mut tool_results: Vec<(String, String)> = Vec::new(); // (tool_call_id, content)

        for block in blocks {
            match block {
                ContentBlock::Text { text } => {
                    if !text.is_empty() {
                        text_parts.push(text.clone());
                    }
                }
                ContentBlock::ToolUse { id, name, input } => {
                    let arguments = serde_json::to_string(input).unwrap_or_else(|_| "{}".to_string());

                    tool_calls.push(OpenAiToolCall {
                        id: id.clone(),
                        tool_type: "function".to_string(),
                        function: OpenAiFunctionCall {
                            name: name.clone(),
                            arguments,
                        },
                    });
                }
                ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                } => {
                    let result_content = content.clone().unwrap_or_else(|| "No output".to_string());

                    let formatted_content = if is_error.unwrap_or(false) {
                        format!("Error: {}", result_content)
                    } else {
                        result_content
                    };

                    tool_results.push((tool_use_id.clone(), formatted_content));
                }
            }
        }

        if role == "assistant" {
            // Assistant messages can have both text and tool calls
            let content = if text_parts.is_empty() {
                None
            } else {
                Some(text_parts.join("\n"))
            };

            openai_messages.push(OpenAiMessage {
                role: role.to_string(),
                content,
                tool_calls: if tool_calls.is_empty() { None } else { Some(tool_calls) },
                tool_call_id: None,
            });
        } else if !text_parts.is_empty() {
            openai_messages.push(OpenAiMessage::text("user", text_parts.join("\n")));
        }

        // Tool results are separate messages with role "tool"
        for (tool_call_id, content) in tool_results {
            openai_messages.push(OpenAiMessage {
                role: "tool".to_string(),
                content: Some(content),
                tool_calls: None,
                tool_call_id: Some(tool_call_id),
            });
        }
    }

    /// Convert internal tool definitions to OpenAI format
    fn convert_tools(&self, tools: &[ToolDefinition]) -> Option<Vec<OpenAiTool>> {
        if tools.is_empty() {
            return None;
        }

        let openai_tools = tools
            .iter()
            .map(|tool| {
                let mut parameters = serde_json::json!({
                    "type": tool.input_schema.schema_type,
                    "properties": tool
                        .input_schema
                        .properties
                        .clone()
                        .unwrap_or_else(|| Value::Object(Default::default())),
                });
                if let Some(ref req) = tool.input_schema.required {
                    parameters["required"] = serde_json::json!(req);
                }

                OpenAiTool {
                    tool_type: "function".to_string(),
                    function: OpenAiFunctionDefinition {
                        name: tool.name.clone(),
                        description: tool.description.clone(),
                        parameters,
                    },
                }
            })
            .collect();

        Some(openai_tools)
    }

    /// Convert tool choice to OpenAI format
    fn convert_tool_choice(&self, tool_choice: &Option<ToolChoice>) -> OpenAiToolChoice {
        match tool_choice {
            Some(ToolChoice::Auto) | None => OpenAiToolChoice::Mode("auto".to_string()),
            Some(ToolChoice::Any) => OpenAiToolChoice::Mode("required".to_string()),
            Some(ToolChoice::None) => OpenAiToolChoice::Mode("none".to_string()),
            Some(ToolChoice::Tool { name }) => OpenAiToolChoice::Function {
                r#type: "function".to_string(),
                function: OpenAiFunctionChoice { name: name.clone() },
            },
        }
    }

    // ========================================================================
    // Format conversion: OpenAI -> internal
    // ========================================================================

    /// Convert OpenAI response to internal MessageResponse format
    fn convert_response(&self, openai_resp: OpenAiResponse) -> Result<MessageResponse> {
        let choice = openai_resp
            .choices
            .into_iter()
            .next()
            .context("No choices in OpenAI response")?;

        let mut content = Vec::new();
        if let Some(text) = choice.message.content {
            if !text.is_empty() {
                content.push(ContentBlock::Text { text });
            }
        }
        for tool_call in choice.message.tool_calls.unwrap_or_default() {
            let input: Value = serde_json::from_str(&tool_call.function.arguments)
                .unwrap_or_else(|_| serde_json::json!({}));
            content.push(ContentBlock::tool_use(tool_call.id, tool_call.function.name, input));
        }

        Ok(MessageResponse {
            id: openai_resp.id,
            model: openai_resp.model,
            content,
            stop_reason: choice.finish_reason.as_deref().map(StopReason::from_finish_reason),
            usage: openai_resp.usage.map(Usage::from).unwrap_or_default(),
        })
    }

    // ========================================================================
    // API methods
    // ========================================================================

    /// Build an OpenAiRequest from internal types
    fn build_request(
        &self,
        messages: &[Message],
        system: Option<&str>,
        tools: &[ToolDefinition],
        tool_choice: &Option<ToolChoice>,
    ) -> OpenAiRequest {
        let openai_tools = self.convert_tools(tools);
        let openai_tool_choice = openai_tools
            .as_ref()
            .map(|_| self.convert_tool_choice(tool_choice));

        let reasoning = self.is_reasoning_model();
        let (max_tokens, max_completion_tokens) = if reasoning {
            (None, Some(self.max_tokens))
        } else {
            (Some(self.max_tokens), None)
        };

        OpenAiRequest {
            model: self.model.clone(),
            messages: self.convert_messages(messages, system),
            max_tokens,
            max_completion_tokens,
            temperature: if reasoning { None } else { Some(self.temperature) },
            tools: openai_tools,
            tool_choice: openai_tool_choice,
            stream: None,
            stream_options: None,
        }
    }

    async fn post(&self, request: &OpenAiRequest) -> Result<reqwest::Response> {
        let request_json =
            serde_json::to_string(request).context("Failed to serialize OpenAI request")?;
        tracing::debug!("[OpenAI] Request JSON: {}", request_json);

        let response = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        tracing::debug!("[OpenAI] Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!("[OpenAI] API error: {} - {}", status, error_text);
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    async fn send_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
        tool_choice: Option<ToolChoice>,
    ) -> Result<MessageResponse> {
        tracing::info!("[OpenAI] Sending message with tools");
        tracing::debug!("[OpenAI] Messages count: {}", messages.len());
        tracing::debug!("[OpenAI] Tools count: {}", tools.len());

        let request = self.build_request(&messages, system, &tools, &tool_choice);
        let response_text = self
            .post(&request)
            .await?
            .text()
            .await
            .context("Failed to read OpenAI response body")?;
        tracing::debug!("[OpenAI] Response body: {}", response_text);

        let openai_response: OpenAiResponse =
            serde_json::from_str(&response_text).context("Failed to parse OpenAI API response")?;
        self.convert_response(openai_response)
    }

    async fn stream_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        tools: Vec<ToolDefinition>,
        tool_choice: Option<ToolChoice>,
    ) -> Result<EventStream> {
        tracing::info!("[OpenAI] Streaming message with tools");
        tracing::debug!("[OpenAI] Messages count: {}", messages.len());
        tracing::debug!("[OpenAI] Tools count: {}", tools.len());

        let mut request = self.build_request(&messages, system, &tools, &tool_choice);
        request.stream = Some(true);
        request.stream_options = Some(OpenAiStreamOptions {
            include_usage: true,
        });

        let response = self.post(&request).await?;
        tracing::info!("[OpenAI] Streaming response started");

        let byte_stream = response.bytes_stream();
        let stream_reader = StreamReader::new(
            byte_stream.map(|result| result.map_err(|e| std::io::Error::other(e.to_string()))),
        );
        let buf_reader = tokio::io::BufReader::new(stream_reader);

        let stream = async_stream::try_stream! {
            let mut lines = buf_reader.lines();
            let mut translator = ChunkTranslator::default();
            let mut chunk_index: usize = 0;

            while let Some(line) = lines.next_line().await? {
                tracing::trace!("[OpenAI] Stream: got line: {}", line);

                let data = match classify_sse_line(&line) {
                    SseLine::Data(data) => data,
                    SseLine::Done => {
                        tracing::info!("[OpenAI] Stream: received [DONE] marker");
                        break;
                    }
                    SseLine::Skip => continue,
                };

                let chunk: OpenAiStreamChunk = match serde_json::from_str(data) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::warn!("[OpenAI] Failed to parse streaming chunk: {}", e);
                        continue;
                    }
                };

                for event in translator.translate(chunk) {
                    yield event;
                }
                chunk_index += 1;
            }

            tracing::info!("[OpenAI] Stream: loop ended after {} chunks", chunk_index);

            for event in translator.finish() {
                yield event;
            }
        };

        Ok(Box::pin(stream))
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
