//! subview: live viewer for Claude subagent transcripts.
//!
//! Layout:
//! - `viewer`: pure state machine (viewport, selection, key mapping)
//! - `presentation`: record to display-line formatting
//! - `ui`: ratatui drawing of a `ViewerState`
//! - `handlers`: the event loop wiring runtime subscriptions to the viewer

mod args;
mod commands;
pub mod handlers;
pub mod logging;
pub mod presentation;
pub mod ui;
pub mod viewer;

pub use args::Cli;
pub use commands::run;
