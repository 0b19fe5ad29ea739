//! State graph: nodes, ordered edges, start node and terminal set; compile and invoke.
//!
//! Build a [`StateGraph`], `compile` it once, then `invoke` it with a fresh state per
//! run. State is typed ([`GraphState`]) and nodes return partial updates that are
//! merged after every step.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod name_node;
mod node;
mod state;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, GraphRun, StopReason};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use name_node::NameNode;
pub use node::{FnNode, Node};
pub use state::{
    BoxedStateUpdater, FieldBasedUpdater, GraphState, MergeUpdater, SharedState, StateUpdater,
};
pub use state_graph::{StateGraph, DEFAULT_MAX_ITERATIONS, END, START};
