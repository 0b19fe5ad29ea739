//! State and tool types.
//!
//! - [`ToolCall`]: one invocation requested by the model; carried on assistant messages.
//! - [`ToolResult`]: outcome of dispatching a call, turned into a tool-role message.
//! - [`AgentGraphState`] / [`AgentGraphUpdate`]: typed state of the think/act/observe
//!   graph built by [`AgentBuilder`](crate::AgentBuilder).

mod agent_state;
mod tool_call;

pub use agent_state::{AgentGraphState, AgentGraphUpdate};
pub use tool_call::{ToolCall, ToolResult};
