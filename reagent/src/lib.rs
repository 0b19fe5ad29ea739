//! # Reagent
//!
//! A small agent-orchestration runtime: bounded control loops that alternate between
//! consulting a language model and invoking named tools, over a minimal state-graph
//! engine.
//!
//! ## Features
//!
//! - **Tool-calling loop**: [`ToolCallingAgent`] submits history, system prompt and tool
//!   specs; a reply without tool calls is the answer (cap 5).
//! - **ReAct loop**: [`ReActAgent`] parses `Thought:` / `Action:` / `Action Input:` /
//!   `Observation:` text and returns the reasoning trace (cap 10).
//! - **State graphs**: [`StateGraph`] with ordered edges, conditional routing, terminal
//!   nodes and an iteration cap (default 50).
//! - **Graph builder**: [`AgentBuilder`] wires think → act → observe; single pass by
//!   default, optionally looping.
//! - **Memory**: [`ConversationMemory`] with FIFO or summarizing eviction plus a
//!   searchable long-term log.
//! - **Config**: [`AgentConfig`] from XDG `config.toml`, `.env` and environment.
//! - **Chains**: [`Chain`] composes async steps (pipe, batch, bind, error handler).
//! - **Prompt templates**: [`prompts::render`] fills `{{variable}}` placeholders.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`GraphState`].
//! - [`agent`]: control loops, [`AgentBuilder`], [`AgentRegistry`].
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`FunctionTool`], [`ToolSpec`].
//! - [`llm`]: [`LlmClient`], [`MockLlm`].
//! - [`memory`]: [`ConversationMemory`], [`LongTermMemory`].
//! - [`state`]: [`ToolCall`], [`ToolResult`], [`AgentGraphState`].
//! - [`chain`]: [`Chain`].
//! - [`prompts`]: template rendering and built-in system prompts.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use reagent::{FunctionTool, MockLlm, ToolCallingAgent, ToolRegistry};
//!
//! # async fn demo() -> Result<(), reagent::AgentError> {
//! let mut tools = ToolRegistry::new();
//! tools.register(Arc::new(FunctionTool::new("echo", "Echo input", |args| Ok(args))));
//!
//! let llm = Arc::new(MockLlm::with_no_tool_calls("hello"));
//! let mut agent = ToolCallingAgent::new(llm, Arc::new(tools), "You are helpful.");
//! let reply = agent.run("hi").await?;
//! assert_eq!(reply.content, "hello");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod chain;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod prompts;
pub mod state;
pub mod tools;
pub mod traits;

pub use agent::{
    AgentBuilder, AgentRegistry, BuiltAgent, ReActAgent, ReasoningStep, ToolCallingAgent,
    UnknownToolPolicy, DEFAULT_REACT_MAX_ITERATIONS, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TOOL_CALLING_MAX_ITERATIONS, MAX_ITERATIONS_REACHED,
};
pub use chain::Chain;
pub use config::AgentConfig;
pub use error::{AgentError, RunError};
pub use graph::{
    CompilationError, CompiledStateGraph, GraphRun, GraphState, Node, StateGraph, StopReason,
    END, START,
};
pub use llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage, MockLlm};
pub use memory::{ConversationMemory, LongTermMemory, MemoryConfig, MemoryItem, TrimPolicy};
pub use message::{Message, Role};
pub use state::{AgentGraphState, AgentGraphUpdate, ToolCall, ToolResult};
pub use tools::{FunctionTool, Tool, ToolError, ToolRegistry, ToolSpec};
pub use traits::{Agent, AgentReply};
