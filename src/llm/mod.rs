pub mod openai;
pub mod provider;
pub mod stream;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::{EventStream, LlmProvider};
pub use stream::ResponseAccumulator;
pub use types::{
    define_tool, ContentBlock, Message, MessageContent, MessageResponse, StopReason, StreamEvent,
    ToolChoice, ToolDefinition, ToolInputSchema, Usage,
};
