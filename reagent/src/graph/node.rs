//! Graph node trait: one step in a StateGraph.
//!
//! A node reads the shared state and returns a partial update; it never mutates the
//! state directly. Routing lives on edges, not in nodes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;

use super::GraphState;

/// One step in a graph: state in, partial update out.
///
/// **Interaction**: registered with `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke`, which merges the returned update.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    /// Node id (e.g. `"think"`). Used in logs.
    fn id(&self) -> &str;

    /// Runs the step. An `Err` aborts the whole invocation unchanged.
    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}

type StepFn<S> =
    Arc<dyn Fn(&S) -> Result<<S as GraphState>::Update, AgentError> + Send + Sync>;

/// Node backed by a synchronous closure. Handy for routing helpers and tests.
pub struct FnNode<S>
where
    S: GraphState,
{
    id: String,
    step: StepFn<S>,
}

impl<S> FnNode<S>
where
    S: GraphState,
{
    pub fn new<F>(id: impl Into<String>, step: F) -> Self
    where
        F: Fn(&S) -> Result<S::Update, AgentError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            step: Arc::new(step),
        }
    }
}

#[async_trait]
impl<S> Node<S> for FnNode<S>
where
    S: GraphState,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: &S) -> Result<S::Update, AgentError> {
        (self.step)(state)
    }
}
