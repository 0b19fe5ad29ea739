//! Agents: the two control loops, the declarative graph builder and a registry.
//!
//! - [`ToolCallingAgent`]: structured tool-calling loop (default cap 5).
//! - [`ReActAgent`]: textual Thought/Action/Observation loop (default cap 10).
//! - [`AgentBuilder`] / [`BuiltAgent`]: think → act → observe graph on [`StateGraph`](crate::graph::StateGraph).
//! - [`AgentRegistry`]: live agents keyed by id.

pub mod builder;
pub mod dispatch;
pub mod driver;
pub mod prompt;
pub mod react;
mod registry;
mod tool_calling;

pub use builder::{AgentBuilder, BuiltAgent};
pub use driver::MAX_ITERATIONS_REACHED;
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use react::{ReActAgent, ReasoningStep, DEFAULT_REACT_MAX_ITERATIONS};
pub use registry::{AgentRegistry, SharedAgent};
pub use tool_calling::{ToolCallingAgent, UnknownToolPolicy, DEFAULT_TOOL_CALLING_MAX_ITERATIONS};
