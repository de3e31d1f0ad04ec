//! Testing infrastructure for subview integration tests.
//!
//! - `ClaudeHome`: isolated `~/.claude` layout with projects, sessions and agents
//! - `records`: JSONL line builders in the transcript wire format
//! - `fixtures`: file helpers (append, partial writes, mtime pinning)

pub mod fixtures;
pub mod records;
pub mod world;

pub use world::{ClaudeHome, ProjectFixture, SessionFixture};
