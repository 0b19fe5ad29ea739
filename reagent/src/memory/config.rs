//! Memory configuration.

/// How the conversation store evicts once it exceeds `max_messages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimPolicy {
    /// Drop oldest messages until at the bound.
    #[default]
    Fifo,
    /// Collapse the oldest messages into one digest, keeping the newest half.
    Summarize,
}

/// Limits for [`ConversationMemory`](super::ConversationMemory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Upper bound on retained messages (digest not counted). Default 100.
    pub max_messages: usize,
    pub policy: TrimPolicy,
    /// User/assistant content must be strictly longer than this to enter the long-term log.
    pub long_term_min_chars: usize,
    /// Characters of each dropped message kept in the digest.
    pub digest_snippet_chars: usize,
}

pub const DEFAULT_MAX_MESSAGES: usize = 100;
pub const DEFAULT_LONG_TERM_MIN_CHARS: usize = 20;
pub const DEFAULT_DIGEST_SNIPPET_CHARS: usize = 50;

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            policy: TrimPolicy::Fifo,
            long_term_min_chars: DEFAULT_LONG_TERM_MIN_CHARS,
            digest_snippet_chars: DEFAULT_DIGEST_SNIPPET_CHARS,
        }
    }
}

impl MemoryConfig {
    pub fn fifo(max_messages: usize) -> Self {
        Self {
            max_messages,
            ..Self::default()
        }
    }

    pub fn summarizing(max_messages: usize) -> Self {
        Self {
            max_messages,
            policy: TrimPolicy::Summarize,
            ..Self::default()
        }
    }
}
