//! Model consultation contract.
//!
//! The control loops and the think node depend on an [`LlmClient`]: given ordered
//! messages, a system prompt and the capability list, it returns assistant text and
//! zero or more tool calls. Transport (HTTP, provider selection, streaming) lives
//! behind this trait; [`MockLlm`] is the scripted implementation used in tests.

mod mock;

pub use mock::MockLlm;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

/// Token usage for one model call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One model consultation.
#[derive(Clone, Debug, Default)]
pub struct LlmRequest {
    pub system_prompt: Option<String>,
    pub messages: Vec<Message>,
    /// Capabilities the model may call; empty means none offered.
    pub tools: Vec<ToolSpec>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from a model call: assistant text and optional tool calls.
///
/// An empty `tool_calls` is the tool-calling loop's only success signal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    /// Provider finish reason (e.g. `"stop"`, `"tool_calls"`), when reported.
    pub finish_reason: Option<String>,
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// Plain text reply with no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: Some("stop".to_string()),
            ..Self::default()
        }
    }

    /// Reply requesting tools.
    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            finish_reason: Some("tool_calls".to_string()),
            usage: None,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// LLM client: given a request, returns assistant text and optional tool calls.
///
/// Transport failures map to `AgentError::ModelCall`; the runtime never retries
/// them and aborts the current loop invocation.
///
/// **Interaction**: used by the tool-calling loop, the ReAct loop and ThinkNode.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, request: &LlmRequest) -> Result<LlmResponse, AgentError>;
}
