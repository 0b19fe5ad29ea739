//! Tool-calling control loop.
//!
//! Each iteration sends the conversation (with digest), the system prompt and the
//! capability list to the model. A reply without tool calls is the final answer.
//! Otherwise the assistant turn is recorded, every requested tool is run in order
//! and its result is appended as a tool message tagged with the call id, and the
//! model is consulted again. Default cap: 5 iterations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmRequest, LlmResponse};
use crate::memory::{ConversationMemory, MemoryConfig};
use crate::message::{Message, Role};
use crate::state::ToolCall;
use crate::tools::ToolRegistry;
use crate::traits::{Agent, AgentReply};

use super::dispatch::dispatch_call;
use super::driver::{LoopDriver, ResponseInterpreter, Step};
use super::prompt::tool_calling_system_prompt;

pub const DEFAULT_TOOL_CALLING_MAX_ITERATIONS: usize = 5;

/// What to do with a tool call naming an unregistered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownToolPolicy {
    /// Log a warning and append nothing.
    #[default]
    Skip,
    /// Append a tool message `"Unknown tool: <name>"` so the model can correct itself.
    Report,
}

impl UnknownToolPolicy {
    pub(crate) fn unknown_tool_message(self, call: &ToolCall) -> Option<Message> {
        tracing::warn!(tool = %call.name, call_id = %call.id, policy = ?self, "Unknown tool requested");
        match self {
            UnknownToolPolicy::Skip => None,
            UnknownToolPolicy::Report => Some(Message::tool(
                call.id.clone(),
                format!("Unknown tool: {}", call.name),
            )),
        }
    }
}

/// Agent driving the structured tool-calling protocol.
///
/// **Interaction**: owns its [`ConversationMemory`]; shares the [`ToolRegistry`] and
/// [`LlmClient`] by `Arc`.
pub struct ToolCallingAgent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_iterations: usize,
    memory: ConversationMemory,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    unknown_tool: UnknownToolPolicy,
}

impl ToolCallingAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            tools,
            system_prompt: system_prompt.into(),
            max_iterations: DEFAULT_TOOL_CALLING_MAX_ITERATIONS,
            memory: ConversationMemory::default(),
            temperature: None,
            max_tokens: None,
            unknown_tool: UnknownToolPolicy::default(),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replaces the memory (and drops any history).
    pub fn with_memory(mut self, config: MemoryConfig) -> Self {
        self.memory = ConversationMemory::new(config);
        self
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool = policy;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn clear_history(&mut self) {
        self.memory.clear();
    }

    /// The system prompt actually sent: base prompt plus tool catalogue.
    pub fn system_prompt(&self) -> String {
        tool_calling_system_prompt(&self.system_prompt, &self.tools.specs())
    }

    /// Handles one user utterance.
    ///
    /// Returns the final answer and the iterations used, or the fallback text with
    /// `exhausted = true`. Only model failures are returned as errors.
    pub async fn run(&mut self, message: &str) -> Result<AgentReply, AgentError> {
        self.memory.append(Role::User, message);
        let driver = LoopDriver::new(self.llm.clone(), self.max_iterations);
        let mut turn = ToolCallingTurn {
            system_prompt: self.system_prompt(),
            memory: &mut self.memory,
            tools: &self.tools,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            unknown_tool: self.unknown_tool,
        };
        let outcome = driver.run(&mut turn).await?;
        Ok(AgentReply {
            content: outcome.answer,
            iterations: outcome.iterations,
            exhausted: outcome.exhausted,
            trace: Vec::new(),
        })
    }
}

struct ToolCallingTurn<'a> {
    system_prompt: String,
    memory: &'a mut ConversationMemory,
    tools: &'a ToolRegistry,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    unknown_tool: UnknownToolPolicy,
}

#[async_trait]
impl<'a> ResponseInterpreter for ToolCallingTurn<'a> {
    fn build_request(&self) -> LlmRequest {
        LlmRequest::new(self.memory.with_summary())
            .with_system_prompt(self.system_prompt.clone())
            .with_tools(self.tools.specs())
            .with_sampling(self.temperature, self.max_tokens)
    }

    async fn interpret(&mut self, response: LlmResponse) -> Step {
        if !response.has_tool_calls() {
            self.memory.append(Role::Assistant, response.content.clone());
            return Step::Finish(response.content);
        }

        let calls = response.tool_calls;
        self.memory
            .push(Message::assistant_with_calls(response.content, calls.clone()));
        for call in &calls {
            match dispatch_call(self.tools, call).await {
                Some(result) => self.memory.push(result.to_message()),
                None => {
                    if let Some(msg) = self.unknown_tool.unknown_tool_message(call) {
                        self.memory.push(msg);
                    }
                }
            }
        }
        Step::Continue
    }
}

#[async_trait]
impl Agent for ToolCallingAgent {
    fn name(&self) -> &str {
        "tool_calling"
    }

    async fn chat(&mut self, message: &str) -> Result<AgentReply, AgentError> {
        self.run(message).await
    }

    fn reset(&mut self) {
        self.clear_history();
    }
}
