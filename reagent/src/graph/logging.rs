//! Logging helpers for graph execution.

use std::fmt::Debug;

use super::StopReason;

pub fn log_node_start(node_id: &str, step: usize) {
    tracing::debug!(node_id = node_id, step = step, "Starting node execution");
}

pub fn log_state_update<U: Debug>(node_id: &str, update: &U) {
    tracing::debug!(node_id = node_id, update = ?update, "Merging node update");
}

pub fn log_graph_start(start: &str) {
    tracing::info!(start = start, "Starting graph execution");
}

pub fn log_graph_complete(steps: usize, stop: StopReason) {
    tracing::info!(steps = steps, ?stop, "Graph execution complete");
}

/// The cap is a soft stop, hence warn rather than error.
pub fn log_iteration_cap(node_id: &str, max_iterations: usize) {
    tracing::warn!(
        node_id = node_id,
        max_iterations = max_iterations,
        "Graph hit iteration cap; returning accumulated state"
    );
}

pub fn log_graph_error(error: &crate::error::AgentError) {
    tracing::error!(?error, "Graph execution error");
}
