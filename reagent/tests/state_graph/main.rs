//! StateGraph integration tests: compile checks and invoke semantics.

#[path = "../init_logging.rs"]
mod init_logging;

mod common;
mod compile;
mod invoke;
