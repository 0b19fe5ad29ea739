//! State graph builder: nodes, ordered edges, start node and terminal set.
//!
//! Register nodes with `add_node`, wire them with `add_edge` / `add_conditional_edges`,
//! pick the entry with `set_start` (or `add_edge(START, id)`), mark halting nodes with
//! `add_terminal`, then `compile`.
//!
//! # Edges
//!
//! Edges are kept per source node in registration order, but only the **first** one
//! is ever consulted at run time; later edges from the same node are ignored and
//! reported at compile time. Targets may be `END` for an explicit halt.
//!
//! # Cycles
//!
//! Cycles are allowed. A global iteration cap (default 50, see `with_max_iterations`)
//! bounds any run that never reaches a terminal node.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::AgentError;

use super::compile_error::CompilationError;
use super::compiled::CompiledStateGraph;
use super::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use super::node::{FnNode, Node};
use super::state::{BoxedStateUpdater, GraphState, MergeUpdater};

/// Sentinel for graph entry: `add_edge(START, first_node_id)` is the same as `set_start`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: `add_edge(last_node_id, END)` halts after that node.
pub const END: &str = "__end__";

/// Default bound on node executions per invocation.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

pub(super) struct NodeEntry<S: GraphState> {
    pub(super) node: Arc<dyn Node<S>>,
    /// Per-node merge override; falls back to the graph's updater.
    pub(super) updater: Option<BoxedStateUpdater<S>>,
}

/// State graph: nodes plus ordered edges.
///
/// **Interaction**: accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S: GraphState> {
    nodes: HashMap<String, NodeEntry<S>>,
    edges: HashMap<String, Vec<NextEntry<S>>>,
    start: Option<String>,
    terminals: HashSet<String>,
    max_iterations: usize,
    state_updater: Option<BoxedStateUpdater<S>>,
}

impl<S: GraphState> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GraphState> StateGraph<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            start: None,
            terminals: HashSet::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            state_updater: None,
        }
    }

    /// Replaces the default bound of 50 node executions per invocation.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Replaces the graph-wide merge (default: [`GraphState::merge`]).
    pub fn with_state_updater(self, updater: BoxedStateUpdater<S>) -> Self {
        Self {
            state_updater: Some(updater),
            ..self
        }
    }

    /// Adds a node; replaces any node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes
            .insert(id.into(), NodeEntry { node, updater: None });
        self
    }

    /// Adds a node whose updates are merged with `updater` instead of the graph's updater.
    pub fn add_node_with_updater(
        &mut self,
        id: impl Into<String>,
        node: Arc<dyn Node<S>>,
        updater: BoxedStateUpdater<S>,
    ) -> &mut Self {
        self.nodes.insert(
            id.into(),
            NodeEntry {
                node,
                updater: Some(updater),
            },
        );
        self
    }

    /// Adds a node backed by a closure (see [`FnNode`]).
    pub fn add_fn_node<F>(&mut self, id: impl Into<String>, step: F) -> &mut Self
    where
        F: Fn(&S) -> Result<S::Update, AgentError> + Send + Sync + 'static,
    {
        let id = id.into();
        let node = Arc::new(FnNode::new(id.clone(), step));
        self.add_node(id, node)
    }

    /// Adds an unconditional edge. `from == START` sets the start node instead.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        let (from, to) = (from.into(), to.into());
        if from == START {
            return self.set_start(to);
        }
        self.edges
            .entry(from)
            .or_default()
            .push(NextEntry::Unconditional(to));
        self
    }

    /// Adds a conditional edge from `source`.
    ///
    /// After `source` runs, `path(state)` returns a key that must be present in
    /// `route_table`; its value (a node id or `END`) is the next node. A missing key
    /// fails the invocation with `AgentError::Routing`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "observe",
    ///     Arc::new(|s: &MyState| if s.done { "done".into() } else { "again".into() }),
    ///     [("again".into(), "think".into()), ("done".into(), END.into())].into_iter().collect(),
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        route_table: HashMap<String, String>,
    ) -> &mut Self {
        self.edges
            .entry(source.into())
            .or_default()
            .push(NextEntry::Conditional(ConditionalRouter::new(
                path,
                route_table,
            )));
        self
    }

    pub fn set_start(&mut self, id: impl Into<String>) -> &mut Self {
        self.start = Some(id.into());
        self
    }

    /// Marks `id` as terminal: the run halts right after it executes.
    pub fn add_terminal(&mut self, id: impl Into<String>) -> &mut Self {
        self.terminals.insert(id.into());
        self
    }

    /// Builds the executable graph.
    ///
    /// Fails only when the start node is unset or not registered.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let start = self.start.ok_or(CompilationError::MissingStart)?;
        if !self.nodes.contains_key(&start) {
            return Err(CompilationError::StartNodeNotFound(start));
        }

        let mut next_map = HashMap::with_capacity(self.edges.len());
        for (from, entries) in self.edges {
            let mut entries = entries.into_iter();
            let Some(first) = entries.next() else {
                continue;
            };
            for ignored in entries {
                tracing::warn!(
                    from = %from,
                    kind = ignored.kind(),
                    "Only the first edge of a node is followed; ignoring extra edge"
                );
            }
            next_map.insert(from, first);
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            start,
            next_map,
            terminals: self.terminals,
            max_iterations: self.max_iterations,
            state_updater: self
                .state_updater
                .unwrap_or_else(|| Arc::new(MergeUpdater)),
        })
    }
}
