//! Shared state for StateGraph integration tests: TraceState records visited nodes.

use reagent::{AgentError, GraphState};

#[derive(Debug, Clone, Default)]
pub struct TraceState {
    pub visited: Vec<String>,
    pub count: u32,
}

#[derive(Debug, Default)]
pub struct TraceUpdate {
    pub visit: Option<String>,
    pub count: Option<u32>,
}

impl GraphState for TraceState {
    type Update = TraceUpdate;

    fn merge(&mut self, update: TraceUpdate) {
        self.visited.extend(update.visit);
        if let Some(count) = update.count {
            self.count = count;
        }
    }
}

/// Step that records `id` and bumps the counter.
pub fn visit(
    id: &'static str,
) -> impl Fn(&TraceState) -> Result<TraceUpdate, AgentError> + Send + Sync + 'static {
    move |s: &TraceState| {
        Ok(TraceUpdate {
            visit: Some(id.to_string()),
            count: Some(s.count + 1),
        })
    }
}

/// Step that always fails.
pub fn fail(
    _s: &TraceState,
) -> Result<TraceUpdate, AgentError> {
    Err(AgentError::ExecutionFailed("always fails".into()))
}
