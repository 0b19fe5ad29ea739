//! Mock LLM for tests and examples.
//!
//! Replays a script of replies in order. Once only one reply is left it is repeated
//! forever, so a single-reply mock behaves like a fixed response. Every request is
//! recorded for later inspection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmRequest, LlmResponse};
use crate::state::ToolCall;

#[derive(Clone, Debug)]
enum Scripted {
    Reply(LlmResponse),
    Fail(String),
}

/// Scripted mock LLM.
///
/// **Interaction**: implements `LlmClient`; used by loop, builder and registry tests.
pub struct MockLlm {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<LlmRequest>>,
    call_count: AtomicUsize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLlm {
    fn from_script(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Always returns `content` with no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::scripted([LlmResponse::text(content)])
    }

    /// Always returns `content` with the given tool calls.
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::scripted([LlmResponse::with_tool_calls(content, tool_calls)])
    }

    /// First call returns `tool_calls`, every later call returns `final_content` without tools.
    pub fn first_tools_then_end(tool_calls: Vec<ToolCall>, final_content: impl Into<String>) -> Self {
        Self::scripted([
            LlmResponse::with_tool_calls("", tool_calls),
            LlmResponse::text(final_content),
        ])
    }

    /// Replays `responses` in order, repeating the last one.
    pub fn scripted(responses: impl IntoIterator<Item = LlmResponse>) -> Self {
        Self::from_script(responses.into_iter().map(Scripted::Reply))
    }

    /// Every call fails with `AgentError::ModelCall(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script([Scripted::Fail(message.into())])
    }

    /// Appends a failure to the script (after the replies already queued).
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        lock(&self.script).push_back(Scripted::Fail(message.into()));
        self
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Copies of all requests received, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        lock(&self.requests).clone()
    }

    fn next_scripted(&self) -> Option<Scripted> {
        let mut script = lock(&self.script);
        if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, request: &LlmRequest) -> Result<LlmResponse, AgentError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.requests).push(request.clone());
        match self.next_scripted() {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(AgentError::ModelCall(message)),
            None => Err(AgentError::ModelCall("mock script is empty".to_string())),
        }
    }
}
