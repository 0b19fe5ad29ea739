//! Act node: runs the tool calls Think requested, through the tool registry.
//!
//! Same recovery rules as the tool-calling loop: failures become `Error: ...` tool
//! messages and unknown tools follow the [`UnknownToolPolicy`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::dispatch::dispatch_call;
use crate::agent::UnknownToolPolicy;
use crate::error::AgentError;
use crate::graph::Node;
use crate::state::{AgentGraphState, AgentGraphUpdate};
use crate::tools::ToolRegistry;

pub const ACT_NODE: &str = "act";

pub struct ActNode {
    tools: Arc<ToolRegistry>,
    unknown_tool: UnknownToolPolicy,
}

impl ActNode {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            tools,
            unknown_tool: UnknownToolPolicy::default(),
        }
    }

    pub fn with_unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool = policy;
        self
    }
}

#[async_trait]
impl Node<AgentGraphState> for ActNode {
    fn id(&self) -> &str {
        ACT_NODE
    }

    async fn run(&self, state: &AgentGraphState) -> Result<AgentGraphUpdate, AgentError> {
        let mut results = Vec::with_capacity(state.tool_calls.len());
        let mut new_messages = Vec::with_capacity(state.tool_calls.len());
        for call in &state.tool_calls {
            match dispatch_call(&self.tools, call).await {
                Some(result) => {
                    new_messages.push(result.to_message());
                    results.push(result);
                }
                None => new_messages.extend(self.unknown_tool.unknown_tool_message(call)),
            }
        }
        Ok(AgentGraphUpdate {
            new_messages,
            tool_results: Some(results),
            action_taken: Some(true),
            ..Default::default()
        })
    }
}
