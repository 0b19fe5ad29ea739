//! Unbounded long-term log of substantive user/assistant messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::Role;

/// One retained message with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub role: Role,
    pub content: String,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log; never trimmed, cleared only on request.
#[derive(Debug, Clone, Default)]
pub struct LongTermMemory {
    items: Vec<MemoryItem>,
}

impl LongTermMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, role: Role, content: impl Into<String>) {
        self.items.push(MemoryItem {
            role,
            content: content.into(),
            recorded_at: Utc::now(),
        });
    }

    /// Case-insensitive substring search, oldest first.
    pub fn search(&self, query: &str) -> Vec<&MemoryItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.content.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn items(&self) -> &[MemoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive() {
        let mut log = LongTermMemory::new();
        log.record(Role::User, "My favourite colour is Teal.");
        log.record(Role::Assistant, "Noted, you like teal a lot.");
        log.record(Role::User, "Something else entirely here.");

        let hits = log.search("TEAL");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].role, Role::User);
        assert!(log.search("purple").is_empty());
    }
}
