//! ReAct control loop: Thought → Action → Action Input → Observation.
//!
//! The loop keeps one evolving prompt that starts as `Question: <utterance>`. Each
//! round the model sees the ReAct system prompt and that prompt; its reply is parsed
//! into a [`ReasoningStep`]:
//!
//! - no `Action:` line: the reply itself is the final answer;
//! - action `finish` (any case): the step's Observation is the final answer, or
//!   [`MAX_ITERATIONS_REACHED`] when the step has no Observation;
//! - a registered tool: it runs on the parsed Action Input and the Observation is
//!   replaced by `Result: ...` or `Error: ...`;
//! - anything else: Observation becomes `Unknown action: <name>`.
//!
//! The completed step is appended to the trace and, verbatim, to the prompt.
//! Default cap: 10 iterations.

mod step;

pub use step::{ReasoningStep, FINISH_ACTION};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmRequest, LlmResponse};
use crate::memory::{ConversationMemory, MemoryConfig};
use crate::message::{Message, Role};
use crate::tools::ToolRegistry;
use crate::traits::{Agent, AgentReply};

use super::dispatch::{execute_to_text, parse_arguments};
use super::driver::{LoopDriver, ResponseInterpreter, Step, MAX_ITERATIONS_REACHED};
use super::prompt::react_system_prompt;

pub const DEFAULT_REACT_MAX_ITERATIONS: usize = 10;

/// Agent driving the textual ReAct protocol.
pub struct ReActAgent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_iterations: usize,
    memory: ConversationMemory,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ReActAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            tools,
            system_prompt: system_prompt.into(),
            max_iterations: DEFAULT_REACT_MAX_ITERATIONS,
            memory: ConversationMemory::default(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_memory(mut self, config: MemoryConfig) -> Self {
        self.memory = ConversationMemory::new(config);
        self
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Holds each question and final answer; the reasoning itself lives in the trace.
    /// A run that hits the cap records only the question.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn clear_history(&mut self) {
        self.memory.clear();
    }

    pub fn system_prompt(&self) -> String {
        react_system_prompt(&self.system_prompt, &self.tools.names())
    }

    /// Handles one question; the reply carries the reasoning trace.
    pub async fn run(&mut self, message: &str) -> Result<AgentReply, AgentError> {
        self.memory.append(Role::User, message);
        let driver = LoopDriver::new(self.llm.clone(), self.max_iterations);
        let mut turn = ReActTurn {
            system_prompt: self.system_prompt(),
            prompt: format!("Question: {message}\n\n"),
            tools: &self.tools,
            trace: Vec::new(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let outcome = driver.run(&mut turn).await?;
        let trace = turn.trace;
        if !outcome.exhausted {
            self.memory.append(Role::Assistant, outcome.answer.clone());
        }
        Ok(AgentReply {
            content: outcome.answer,
            iterations: outcome.iterations,
            exhausted: outcome.exhausted,
            trace,
        })
    }
}

struct ReActTurn<'a> {
    system_prompt: String,
    prompt: String,
    tools: &'a ToolRegistry,
    trace: Vec<ReasoningStep>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ReActTurn<'_> {
    async fn observe(&self, action: &str, action_input: Option<&str>) -> String {
        let Some(tool) = self.tools.get(action) else {
            tracing::warn!(action = action, "Unknown ReAct action");
            return format!("Unknown action: {action}");
        };
        let params = parse_arguments(action_input.unwrap_or_default());
        match execute_to_text(tool.as_ref(), params).await {
            Ok(text) => format!("Result: {text}"),
            Err(error_text) => error_text,
        }
    }
}

#[async_trait]
impl<'a> ResponseInterpreter for ReActTurn<'a> {
    fn build_request(&self) -> LlmRequest {
        LlmRequest::new(vec![
            Message::system(self.system_prompt.clone()),
            Message::user(self.prompt.clone()),
        ])
        .with_sampling(self.temperature, self.max_tokens)
    }

    async fn interpret(&mut self, response: LlmResponse) -> Step {
        let Some(mut step) = ReasoningStep::parse(&response.content) else {
            return Step::Finish(response.content);
        };
        if step.is_finish() {
            let answer = step
                .observation
                .clone()
                .unwrap_or_else(|| MAX_ITERATIONS_REACHED.to_string());
            self.trace.push(step);
            return Step::Finish(answer);
        }

        let action = step.action.clone().unwrap_or_default();
        tracing::debug!(action = %action, step = self.trace.len() + 1, "ReAct step");
        let observation = self.observe(&action, step.action_input.as_deref()).await;
        step.observation = Some(observation);

        self.prompt.push_str("\n\n");
        self.prompt.push_str(&step.format());
        self.trace.push(step);
        Step::Continue
    }
}

#[async_trait]
impl Agent for ReActAgent {
    fn name(&self) -> &str {
        "react"
    }

    async fn chat(&mut self, message: &str) -> Result<AgentReply, AgentError> {
        self.run(message).await
    }

    fn reset(&mut self) {
        self.clear_history();
    }
}
