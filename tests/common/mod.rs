//! Scripted LLM provider for tests; no network involved.

#![allow(dead_code)]

use anyhow::Result;
use pocketpal::llm::{
    ContentBlock, EventStream, LlmProvider, Message, MessageResponse, StopReason, StreamEvent,
    ToolChoice, ToolDefinition,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted model reply
pub enum Reply {
    Events(Vec<StreamEvent>),
    /// The request itself fails
    Fail(String),
    /// The stream yields these events, then an error
    FailMidStream(Vec<StreamEvent>, String),
}

/// A reply made of streamed text that ends the turn
pub fn text_reply(chunks: &[&str]) -> Reply {
    let mut events = vec![StreamEvent::MessageStart {
        id: "resp".to_string(),
        model: "scripted".to_string(),
    }];
    events.extend(chunks.iter().map(|c| StreamEvent::TextDelta {
        text: c.to_string(),
    }));
    events.push(StreamEvent::MessageDelta {
        stop_reason: Some(StopReason::EndTurn),
        usage: None,
    });
    events.push(StreamEvent::MessageStop);
    Reply::Events(events)
}

/// A reply that asks for the given tool calls
pub fn tool_reply(calls: &[(&str, &str, Value)]) -> Reply {
    let mut events = vec![StreamEvent::MessageStart {
        id: "resp".to_string(),
        model: "scripted".to_string(),
    }];
    for (index, (id, name, input)) in calls.iter().enumerate() {
        events.push(StreamEvent::ToolUseStart {
            index: index as u32,
            id: id.to_string(),
            name: name.to_string(),
        });
        events.push(StreamEvent::ToolInputDelta {
            index: index as u32,
            partial_json: input.to_string(),
        });
    }
    events.push(StreamEvent::MessageDelta {
        stop_reason: Some(StopReason::ToolUse),
        usage: None,
    });
    events.push(StreamEvent::MessageStop);
    Reply::Events(events)
}

#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Vec<Message>>>,
    systems: Mutex<Vec<Option<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            systems: Mutex::new(Vec::new()),
        }
    }

    /// Message lists received, one per model call
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// System prompts received, one per model call
    pub fn systems(&self) -> Vec<Option<String>> {
        self.systems.lock().unwrap().clone()
    }

    fn next_reply(&self, messages: Vec<Message>, system: Option<&str>) -> Reply {
        self.requests.lock().unwrap().push(messages);
        self.systems.lock().unwrap().push(system.map(str::to_string));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| text_reply(&["(script exhausted)"]))
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedProvider {
    async fn send_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        _tools: Vec<ToolDefinition>,
        _tool_choice: Option<ToolChoice>,
    ) -> Result<MessageResponse> {
        match self.next_reply(messages, system) {
            Reply::Events(events) => {
                let mut acc = pocketpal::llm::ResponseAccumulator::new();
                for event in &events {
                    acc.push(event);
                }
                Ok(acc.finish())
            }
            Reply::Fail(msg) | Reply::FailMidStream(_, msg) => Err(anyhow::anyhow!(msg)),
        }
    }

    async fn stream_with_tools(
        &self,
        messages: Vec<Message>,
        system: Option<&str>,
        _tools: Vec<ToolDefinition>,
        _tool_choice: Option<ToolChoice>,
    ) -> Result<EventStream> {
        match self.next_reply(messages, system) {
            Reply::Events(events) => {
                Ok(Box::pin(futures::stream::iter(events.into_iter().map(Ok))))
            }
            Reply::Fail(msg) => Err(anyhow::anyhow!(msg)),
            Reply::FailMidStream(events, msg) => {
                let items = events
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(anyhow::anyhow!(msg))));
                Ok(Box::pin(futures::stream::iter(items)))
            }
        }
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Tool results carried by a message, as (tool_use_id, content, is_error)
pub fn tool_results(message: &Message) -> Vec<(String, String, bool)> {
    match &message.content {
        pocketpal::llm::MessageContent::Blocks(blocks) => blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                } => Some((
                    tool_use_id.clone(),
                    content.clone().unwrap_or_default(),
                    is_error.unwrap_or(false),
                )),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
