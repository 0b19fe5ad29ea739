//! Compiled state graph: immutable, supports invoke only.
//!
//! Execution is strictly sequential. Each step runs the current node, merges its
//! update, then either halts (terminal node, `END`, no outgoing edge, iteration cap)
//! or resolves the next node from the node's first edge.

use std::collections::{HashMap, HashSet};

use crate::error::AgentError;

use super::conditional::NextEntry;
use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_iteration_cap, log_node_start,
    log_state_update,
};
use super::state::{BoxedStateUpdater, GraphState};
use super::state_graph::{NodeEntry, END};

/// Why an invocation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last node executed is in the terminal set.
    Terminal,
    /// The last node's edge led to `END`.
    End,
    /// The last node has no outgoing edge.
    NoOutgoingEdge,
    /// The iteration cap was reached before any of the above.
    IterationCap,
}

/// Outcome of one invocation: final state plus how it got there.
#[derive(Debug, Clone)]
pub struct GraphRun<S> {
    pub state: S,
    /// Nodes executed; every execution merged exactly one update.
    pub steps: usize,
    pub stop: StopReason,
}

/// Compiled graph: immutable structure, supports invoke only.
///
/// Created by `StateGraph::compile()`. Shared state is created by the caller per
/// invocation and handed back in the result.
pub struct CompiledStateGraph<S: GraphState> {
    pub(super) nodes: HashMap<String, NodeEntry<S>>,
    pub(super) start: String,
    /// First edge per source node.
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) terminals: HashSet<String>,
    pub(super) max_iterations: usize,
    pub(super) state_updater: BoxedStateUpdater<S>,
}

impl<S: GraphState> CompiledStateGraph<S> {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Runs the graph from the start node.
    ///
    /// Errors: a node's own error, `AgentError::Routing` for an unmapped router key,
    /// `AgentError::NodeNotFound` when an edge leads to an unregistered node.
    /// Hitting the iteration cap is not an error (`StopReason::IterationCap`).
    pub async fn invoke(&self, state: S) -> Result<GraphRun<S>, AgentError> {
        log_graph_start(&self.start);
        let result = self.run_loop(state).await;
        match &result {
            Ok(run) => log_graph_complete(run.steps, run.stop),
            Err(e) => log_graph_error(e),
        }
        result
    }

    /// Like `invoke` but returns only the final state.
    pub async fn invoke_state(&self, state: S) -> Result<S, AgentError> {
        Ok(self.invoke(state).await?.state)
    }

    async fn run_loop(&self, mut state: S) -> Result<GraphRun<S>, AgentError> {
        let mut current = self.start.clone();
        let mut steps = 0;

        let stop = loop {
            if steps >= self.max_iterations {
                log_iteration_cap(&current, self.max_iterations);
                break StopReason::IterationCap;
            }
            let entry = self
                .nodes
                .get(&current)
                .ok_or_else(|| AgentError::NodeNotFound(current.clone()))?;

            steps += 1;
            log_node_start(&current, steps);
            let update = entry.node.run(&state).await?;
            log_state_update(&current, &update);
            entry
                .updater
                .as_ref()
                .unwrap_or(&self.state_updater)
                .apply_update(&mut state, update);

            if self.terminals.contains(&current) {
                break StopReason::Terminal;
            }
            let next = match self.next_map.get(&current) {
                None => break StopReason::NoOutgoingEdge,
                Some(NextEntry::Unconditional(to)) => to.clone(),
                Some(NextEntry::Conditional(router)) => router.resolve(&current, &state)?,
            };
            if next == END {
                break StopReason::End;
            }
            current = next;
        };

        Ok(GraphRun { state, steps, stop })
    }
}
