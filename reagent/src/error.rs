//! Runtime error types.
//!
//! `AgentError` covers everything that aborts a graph invocation or a control loop.
//! Tool failures never show up here: the loops turn them into tool messages
//! (see [`ToolError`](crate::tools::ToolError)).

use thiserror::Error;

use crate::graph::CompilationError;

/// Error that aborts the current invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A node failed (e.g. a custom node returned an error).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The model consultation failed. Never retried by the runtime.
    #[error("model call failed: {0}")]
    ModelCall(String),

    /// A conditional edge produced a key that is not in its route table.
    #[error("no route for key {key:?} from node {from}")]
    Routing { from: String, key: String },

    /// An edge pointed at a node that was never registered.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Registry lookup by id failed.
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    /// A [`Chain`](crate::chain::Chain) step failed and had no error handler.
    #[error("chain {name} failed: {source}")]
    Chain {
        name: String,
        #[source]
        source: Box<AgentError>,
    },
}

/// Error from building and running a graph in one call (e.g. [`BuiltAgent`](crate::BuiltAgent)).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Compilation(#[from] CompilationError),

    #[error(transparent)]
    Execution(#[from] AgentError),
}
