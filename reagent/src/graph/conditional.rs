//! Conditional edges: route to the next node based on state.
//!
//! After the source node runs and its update is merged, the router is called with
//! the post-merge state and returns a key. The key is looked up in the route table;
//! a key with no entry is a routing error, never a silent fallthrough.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;

use super::GraphState;

/// Router function: takes a reference to state and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Routing function plus its route table (key to node id or `END`).
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    pub(super) route_table: HashMap<String, String>,
}

impl<S> ConditionalRouter<S>
where
    S: GraphState,
{
    pub fn new(path: ConditionalRouterFn<S>, route_table: HashMap<String, String>) -> Self {
        Self { path, route_table }
    }

    /// Resolves the next node id from the current state.
    ///
    /// `from` is only used for the error. Returns `AgentError::Routing` when the
    /// router's key has no entry in the table.
    pub fn resolve(&self, from: &str, state: &S) -> Result<String, AgentError> {
        let key = (self.path)(state);
        match self.route_table.get(&key) {
            Some(target) => {
                tracing::debug!(from = from, key = %key, target = %target, "Conditional route");
                Ok(target.clone())
            }
            None => Err(AgentError::Routing {
                from: from.to_string(),
                key,
            }),
        }
    }
}

/// How to determine the next node after a given node runs.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Single fixed next node (or END).
    Unconditional(String),
    /// Next node is decided by the router from the post-merge state.
    Conditional(ConditionalRouter<S>),
}

impl<S> NextEntry<S> {
    pub(super) fn kind(&self) -> &'static str {
        match self {
            NextEntry::Unconditional(_) => "unconditional",
            NextEntry::Conditional(_) => "conditional",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SharedState;
    use serde_json::json;

    fn router() -> ConditionalRouter<SharedState> {
        ConditionalRouter::new(
            Arc::new(|s: &SharedState| {
                s.get("route")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            }),
            [("left".to_string(), "a".to_string())].into_iter().collect(),
        )
    }

    /// **Scenario**: a key present in the table resolves to its target.
    #[test]
    fn resolve_known_key() {
        let state: SharedState = [("route".to_string(), json!("left"))].into_iter().collect();
        assert_eq!(router().resolve("src", &state).unwrap(), "a");
    }

    /// **Scenario**: a key absent from the table fails with Routing carrying source and key.
    #[test]
    fn resolve_unknown_key_is_routing_error() {
        let state: SharedState = [("route".to_string(), json!("right"))].into_iter().collect();
        match router().resolve("src", &state) {
            Err(AgentError::Routing { from, key }) => {
                assert_eq!(from, "src");
                assert_eq!(key, "right");
            }
            other => panic!("expected Routing, got {:?}", other),
        }
    }
}
