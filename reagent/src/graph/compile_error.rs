//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the graph has no usable entry point.
//! Nothing else is checked at compile time: dangling edge targets surface as
//! `AgentError::NodeNotFound` only if a run actually reaches them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilationError {
    /// Neither `set_start` nor `add_edge(START, ..)` was called.
    #[error("graph has no start node")]
    MissingStart,

    /// The start node id was never registered via `add_node`.
    #[error("start node not registered: {0}")]
    StartNodeNotFound(String),
}
