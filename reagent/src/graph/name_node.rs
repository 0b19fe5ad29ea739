//! Name node: a no-op node that only has a name.
//!
//! Useful as a placeholder or a join point. Returns an empty update, so the
//! state passes through unchanged.

use async_trait::async_trait;

use crate::error::AgentError;

use super::{GraphState, Node};

/// A node that does nothing except expose a name.
pub struct NameNode {
    name: String,
}

impl NameNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl<S> Node<S> for NameNode
where
    S: GraphState,
{
    fn id(&self) -> &str {
        &self.name
    }

    async fn run(&self, _state: &S) -> Result<S::Update, AgentError> {
        Ok(S::Update::default())
    }
}
