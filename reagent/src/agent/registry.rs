//! Concurrent store of live agents, one per conversation.
//!
//! Agents own their memory and need `&mut self` to chat, so each entry sits behind a
//! `tokio::sync::Mutex`: concurrent calls on the same id are serialized, calls on
//! different ids run in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::error::AgentError;
use crate::traits::{Agent, AgentReply};

pub type SharedAgent<A> = Arc<Mutex<A>>;

pub struct AgentRegistry<A: Agent = Box<dyn Agent>> {
    agents: DashMap<String, SharedAgent<A>>,
}

impl<A: Agent> Default for AgentRegistry<A> {
    fn default() -> Self {
        Self {
            agents: DashMap::new(),
        }
    }
}

impl<A: Agent> AgentRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `agent` under a fresh UUID and returns the id.
    pub fn insert(&self, agent: A) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert_with_id(id.clone(), agent);
        id
    }

    /// Stores `agent` under `id`, replacing any previous agent with that id.
    pub fn insert_with_id(&self, id: impl Into<String>, agent: A) {
        let id = id.into();
        tracing::debug!(agent_id = %id, kind = agent.name(), "Registering agent");
        self.agents.insert(id, Arc::new(Mutex::new(agent)));
    }

    pub fn get(&self, id: &str) -> Option<SharedAgent<A>> {
        self.agents.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<SharedAgent<A>> {
        self.agents.remove(id).map(|(_, agent)| agent)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.agents.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Sends `message` to the agent registered as `id`.
    ///
    /// The map entry is released before the agent runs, so the registry stays usable
    /// while a long chat is in flight.
    pub async fn chat(&self, id: &str, message: &str) -> Result<AgentReply, AgentError> {
        let agent = self
            .get(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.to_string()))?;
        let mut agent = agent.lock().await;
        agent.chat(message).await
    }

    /// Clears the conversation of the agent registered as `id`.
    pub async fn reset(&self, id: &str) -> Result<(), AgentError> {
        let agent = self
            .get(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.to_string()))?;
        agent.lock().await.reset();
        Ok(())
    }
}
