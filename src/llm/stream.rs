//! Folding stream events back into a complete response

use serde_json::Value;
use std::collections::BTreeMap;

use super::types::{ContentBlock, MessageResponse, StopReason, StreamEvent, Usage};

#[derive(Debug, Default)]
struct PendingToolUse {
    id: String,
    name: String,
    arguments: String,
}

/// Accumulates [`StreamEvent`]s into a [`MessageResponse`]
///
/// Text fragments are merged into a single text block placed before any
/// tool calls. Tool calls keep the order of their stream index.
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    id: String,
    model: String,
    text: String,
    tool_uses: BTreeMap<u32, PendingToolUse>,
    stop_reason: Option<StopReason>,
    usage: Usage,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: &StreamEvent) {
        match event {
            StreamEvent::MessageStart { id, model } => {
                self.id = id.clone();
                self.model = model.clone();
            }
            StreamEvent::TextDelta { text } => self.text.push_str(text),
            StreamEvent::ToolUseStart { index, id, name } => {
                let entry = self.tool_uses.entry(*index).or_default();
                entry.id = id.clone();
                entry.name = name.clone();
            }
            StreamEvent::ToolInputDelta {
                index,
                partial_json,
            } => {
                self.tool_uses
                    .entry(*index)
                    .or_default()
                    .arguments
                    .push_str(partial_json);
            }
            StreamEvent::MessageDelta { stop_reason, usage } => {
                if stop_reason.is_some() {
                    self.stop_reason = *stop_reason;
                }
                if let Some(usage) = usage {
                    self.usage = *usage;
                }
            }
            StreamEvent::MessageStop => {}
        }
    }

    pub fn finish(self) -> MessageResponse {
        let mut content = Vec::new();
        if !self.text.is_empty() {
            content.push(ContentBlock::Text { text: self.text });
        }

        for (index, pending) in self.tool_uses {
            let input = if pending.arguments.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&pending.arguments).unwrap_or_else(|e| {
                    tracing::warn!(
                        "Tool call #{} ({}) has unparseable arguments: {}",
                        index,
                        pending.name,
                        e
                    );
                    Value::Object(Default::default())
                })
            };
            content.push(ContentBlock::ToolUse {
                id: pending.id,
                name: pending.name,
                input,
            });
        }

        MessageResponse {
            id: self.id,
            model: self.model,
            content,
            stop_reason: self.stop_reason,
            usage: self.usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_only_response() {
        let mut acc = ResponseAccumulator::new();
        acc.push(&StreamEvent::MessageStart {
            id: "chatcmpl-1".to_string(),
            model: "gpt-4o-mini".to_string(),
        });
        acc.push(&StreamEvent::TextDelta { text: "Hel".to_string() });
        acc.push(&StreamEvent::TextDelta { text: "lo!".to_string() });
        acc.push(&StreamEvent::MessageDelta {
            stop_reason: Some(StopReason::EndTurn),
            usage: None,
        });
        acc.push(&StreamEvent::MessageStop);

        let response = acc.finish();
        assert_eq!(response.id, "chatcmpl-1");
        assert_eq!(response.text(), "Hello!");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert!(!response.has_tool_use());
    }

    #[test]
    fn test_two_tool_calls_keep_index_order() {
        let mut acc = ResponseAccumulator::new();
        acc.push(&StreamEvent::ToolUseStart {
            index: 1,
            id: "call_b".to_string(),
            name: "dice_roll".to_string(),
        });
        acc.push(&StreamEvent::ToolUseStart {
            index: 0,
            id: "call_a".to_string(),
            name: "say_hello".to_string(),
        });
        acc.push(&StreamEvent::ToolInputDelta {
            index: 0,
            partial_json: "{\"name\":".to_string(),
        });
        acc.push(&StreamEvent::ToolInputDelta {
            index: 0,
            partial_json: "\"Ada\"}".to_string(),
        });
        acc.push(&StreamEvent::MessageDelta {
            stop_reason: Some(StopReason::ToolUse),
            usage: Some(Usage {
                input_tokens: 10,
                output_tokens: 4,
            }),
        });

        let response = acc.finish();
        assert_eq!(
            response.content,
            vec![
                ContentBlock::tool_use("call_a", "say_hello", json!({"name": "Ada"})),
                ContentBlock::tool_use("call_b", "dice_roll", json!({})),
            ]
        );
        assert_eq!(response.usage.output_tokens, 4);
    }

    #[test]
    fn test_bad_arguments_become_empty_object() {
        let mut acc = ResponseAccumulator::new();
        acc.push(&StreamEvent::ToolUseStart {
            index: 0,
            id: "call_x".to_string(),
            name: "calculator".to_string(),
        });
        acc.push(&StreamEvent::ToolInputDelta {
            index: 0,
            partial_json: "{\"a\": 1,".to_string(),
        });

        let response = acc.finish();
        assert_eq!(
            response.content,
            vec![ContentBlock::tool_use("call_x", "calculator", json!({}))]
        );
    }
}
