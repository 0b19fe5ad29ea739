//! Typed state for the think → act → observe agent graph.

use serde::{Deserialize, Serialize};

use crate::graph::GraphState;
use crate::llm::LlmUsage;
use crate::message::{Message, Role};
use crate::state::{ToolCall, ToolResult};

/// State flowing through the agent graph.
///
/// Think writes `ai_thought`, `tool_calls` and `has_tool_calls`; Act writes
/// `tool_results` and `action_taken`; Observe writes `observation` and bumps `turns`.
/// `messages` is the conversation for this invocation, starting with the user message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentGraphState {
    pub user_message: String,
    pub messages: Vec<Message>,
    pub ai_thought: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub has_tool_calls: bool,
    pub tool_results: Vec<ToolResult>,
    pub action_taken: bool,
    pub observation: Option<String>,
    /// Completed observe rounds.
    pub turns: u32,
    /// Token usage summed over all think rounds, when the model reports it.
    #[serde(default)]
    pub total_usage: Option<LlmUsage>,
}

impl AgentGraphState {
    pub fn new(user_message: impl Into<String>) -> Self {
        let user_message = user_message.into();
        Self {
            messages: vec![Message::user(user_message.clone())],
            user_message,
            ..Self::default()
        }
    }

    /// Content of the last assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

/// Partial update returned by agent graph nodes.
///
/// `None` fields leave the state untouched. `new_messages` is appended, never replaces.
#[derive(Debug, Clone, Default)]
pub struct AgentGraphUpdate {
    pub new_messages: Vec<Message>,
    pub ai_thought: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
    pub has_tool_calls: Option<bool>,
    pub tool_results: Option<Vec<ToolResult>>,
    pub action_taken: Option<bool>,
    pub observation: Option<String>,
    pub turns: Option<u32>,
    pub total_usage: Option<LlmUsage>,
}

impl GraphState for AgentGraphState {
    type Update = AgentGraphUpdate;

    fn merge(&mut self, update: AgentGraphUpdate) {
        self.messages.extend(update.new_messages);
        if let Some(v) = update.ai_thought {
            self.ai_thought = Some(v);
        }
        if let Some(v) = update.tool_calls {
            self.tool_calls = v;
        }
        if let Some(v) = update.has_tool_calls {
            self.has_tool_calls = v;
        }
        if let Some(v) = update.tool_results {
            self.tool_results = v;
        }
        if let Some(v) = update.action_taken {
            self.action_taken = v;
        }
        if let Some(v) = update.observation {
            self.observation = Some(v);
        }
        if let Some(v) = update.turns {
            self.turns = v;
        }
        if let Some(v) = update.total_usage {
            self.total_usage = Some(v);
        }
    }
}
