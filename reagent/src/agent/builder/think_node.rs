//! Think node: one model consultation over the conversation so far.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::{LlmClient, LlmRequest, LlmUsage};
use crate::message::Message;
use crate::state::{AgentGraphState, AgentGraphUpdate};
use crate::tools::ToolRegistry;

pub const THINK_NODE: &str = "think";

pub struct ThinkNode {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ThinkNode {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            tools,
            system_prompt: system_prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

fn add_usage(total: Option<LlmUsage>, this_call: Option<LlmUsage>) -> Option<LlmUsage> {
    match (total, this_call) {
        (Some(t), Some(u)) => Some(LlmUsage {
            prompt_tokens: t.prompt_tokens + u.prompt_tokens,
            completion_tokens: t.completion_tokens + u.completion_tokens,
            total_tokens: t.total_tokens + u.total_tokens,
        }),
        (t, u) => t.or(u),
    }
}

#[async_trait]
impl Node<AgentGraphState> for ThinkNode {
    fn id(&self) -> &str {
        THINK_NODE
    }

    async fn run(&self, state: &AgentGraphState) -> Result<AgentGraphUpdate, AgentError> {
        let request = LlmRequest::new(state.messages.clone())
            .with_system_prompt(self.system_prompt.clone())
            .with_tools(self.tools.specs())
            .with_sampling(self.temperature, self.max_tokens);
        let response = self.llm.invoke(&request).await?;

        let has_tool_calls = response.has_tool_calls();
        tracing::debug!(
            tool_calls = response.tool_calls.len(),
            turn = state.turns + 1,
            "Think produced reply"
        );
        let message = if has_tool_calls {
            Message::assistant_with_calls(response.content.clone(), response.tool_calls.clone())
        } else {
            Message::assistant(response.content.clone())
        };
        Ok(AgentGraphUpdate {
            new_messages: vec![message],
            ai_thought: Some(response.content),
            tool_calls: Some(response.tool_calls),
            has_tool_calls: Some(has_tool_calls),
            total_usage: add_usage(state.total_usage, response.usage),
            ..Default::default()
        })
    }
}
