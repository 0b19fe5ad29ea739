//! Core agent trait: one conversation, one utterance in, one reply out.
//!
//! Implemented by [`ToolCallingAgent`](crate::ToolCallingAgent),
//! [`ReActAgent`](crate::ReActAgent) and [`BuiltAgent`](crate::BuiltAgent); stored in
//! [`AgentRegistry`](crate::AgentRegistry).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agent::react::ReasoningStep;
use crate::error::AgentError;

/// Result of one `chat` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    /// Final answer, or the fallback text when the cap was hit.
    pub content: String,
    /// Iterations actually consumed.
    pub iterations: usize,
    /// True when the iteration cap was reached without a final answer.
    pub exhausted: bool,
    /// Reasoning steps, oldest first. Empty for non-ReAct agents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<ReasoningStep>,
}

/// A conversational agent.
///
/// `chat` takes `&mut self`: an agent and its memory belong to one conversation and
/// are never shared without outside synchronization (see `AgentRegistry`).
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent kind, e.g. `"tool_calling"`. Used in logs.
    fn name(&self) -> &str;

    async fn chat(&mut self, message: &str) -> Result<AgentReply, AgentError>;

    /// Forgets conversation history. Default: nothing to forget.
    fn reset(&mut self) {}
}

#[async_trait]
impl<A> Agent for Box<A>
where
    A: Agent + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn chat(&mut self, message: &str) -> Result<AgentReply, AgentError> {
        (**self).chat(message).await
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
