//! Conversation memory.
//!
//! - [`ConversationMemory`]: bounded, ordered message log for one conversation, with
//!   FIFO or summarizing eviction ([`TrimPolicy`]).
//! - [`LongTermMemory`]: unbounded log of substantive user/assistant messages with
//!   substring search, kept alongside.

mod config;
mod conversation;
mod long_term;

pub use config::{
    MemoryConfig, TrimPolicy, DEFAULT_DIGEST_SNIPPET_CHARS, DEFAULT_LONG_TERM_MIN_CHARS,
    DEFAULT_MAX_MESSAGES,
};
pub use conversation::{ConversationMemory, SUMMARY_PREFIX};
pub use long_term::{LongTermMemory, MemoryItem};
