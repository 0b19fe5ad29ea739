//! Observe node: marks the round complete.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::state::{AgentGraphState, AgentGraphUpdate};

pub const OBSERVE_NODE: &str = "observe";

/// Value written to `observation` after each round.
pub const OBSERVATION_COMPLETED: &str = "completed";

#[derive(Debug, Default)]
pub struct ObserveNode;

impl ObserveNode {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Node<AgentGraphState> for ObserveNode {
    fn id(&self) -> &str {
        OBSERVE_NODE
    }

    async fn run(&self, state: &AgentGraphState) -> Result<AgentGraphUpdate, AgentError> {
        Ok(AgentGraphUpdate {
            observation: Some(OBSERVATION_COMPLETED.to_string()),
            turns: Some(state.turns.saturating_add(1)),
            ..Default::default()
        })
    }
}
