//! Bounded conversation store with FIFO or summarizing eviction.
//!
//! The store never holds more than `max_messages` messages after an append. With
//! [`TrimPolicy::Summarize`] the evicted messages are folded into a digest that
//! `with_summary` prepends as a system message; each compaction replaces the
//! previous digest outright.

use std::collections::VecDeque;

use crate::message::{Message, Role};

use super::config::{MemoryConfig, TrimPolicy};
use super::long_term::{LongTermMemory, MemoryItem};

/// Prefix of the digest message returned by `with_summary`.
pub const SUMMARY_PREFIX: &str = "[Summary of previous conversation]: ";

/// Ordered message log owned by one conversation.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    config: MemoryConfig,
    messages: VecDeque<Message>,
    summary: Option<String>,
    long_term: LongTermMemory,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

impl ConversationMemory {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            config,
            messages: VecDeque::new(),
            summary: None,
            long_term: LongTermMemory::new(),
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.push(Message::new(role, content));
    }

    /// Appends a full message (tool linkage included), then trims if over the bound.
    pub fn push(&mut self, message: Message) {
        if matches!(message.role, Role::User | Role::Assistant)
            && message.content.chars().count() > self.config.long_term_min_chars
        {
            self.long_term.record(message.role, message.content.clone());
        }
        self.messages.push_back(message);
        if self.messages.len() > self.config.max_messages {
            self.trim();
        }
    }

    fn trim(&mut self) {
        match self.config.policy {
            TrimPolicy::Fifo => {
                let excess = self.messages.len() - self.config.max_messages;
                self.messages.drain(..excess);
                tracing::debug!(dropped = excess, "Memory trimmed (fifo)");
            }
            TrimPolicy::Summarize => {
                let keep = self.config.max_messages / 2;
                let dropped = self.messages.len() - keep;
                let width = self.config.digest_snippet_chars;
                let digest: String = self
                    .messages
                    .drain(..dropped)
                    .map(|m| {
                        let snippet: String = m.content.chars().take(width).collect();
                        format!("{}: {}...; ", m.role, snippet)
                    })
                    .collect();
                self.summary = Some(digest);
                tracing::debug!(dropped = dropped, kept = keep, "Memory compacted into digest");
            }
        }
    }

    /// Last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Message> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }

    pub fn all(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Digest (if any) as a system message, followed by the retained messages.
    pub fn with_summary(&self) -> Vec<Message> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        if let Some(summary) = &self.summary {
            out.push(Message::system(format!("{SUMMARY_PREFIX}{summary}")));
        }
        out.extend(self.messages.iter().cloned());
        out
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Drops messages and digest. The long-term log is kept.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.summary = None;
    }

    pub fn size(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Rough token count: a quarter of the characters of each message plus the digest.
    pub fn estimate_tokens(&self) -> usize {
        let messages: usize = self
            .messages
            .iter()
            .map(|m| m.content.chars().count() / 4)
            .sum();
        let summary = self.summary.as_ref().map_or(0, |s| s.chars().count() / 4);
        messages + summary
    }

    pub fn long_term(&self) -> &LongTermMemory {
        &self.long_term
    }

    pub fn search_long_term(&self, query: &str) -> Vec<&MemoryItem> {
        self.long_term.search(query)
    }

    pub fn clear_long_term(&mut self) {
        self.long_term.clear();
    }
}
