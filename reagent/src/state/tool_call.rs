//! Tool call and tool result types shared by the loops and the agent graph.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A single tool invocation requested by the model.
///
/// `arguments` is the raw JSON text the model produced; it is parsed only when the
/// call is dispatched, so a malformed payload never breaks the request/response path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Outcome of dispatching one [`ToolCall`].
///
/// Failures are data here: `content` holds the error text and `is_error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn ok(call: &ToolCall, content: impl Into<String>) -> Self {
        Self {
            call_id: call.id.clone(),
            name: call.name.clone(),
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(call: &ToolCall, content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::ok(call, content)
        }
    }

    /// Tool-role message tagged with the originating call id.
    pub fn to_message(&self) -> Message {
        Message::tool(self.call_id.clone(), self.content.clone())
    }
}
