//! Actor system for watch mode.
//!
//! ```text
//! FsActor ─────┐
//!  (watch)     ├──▶ SessionActor ──▶ pane / sandbox / permalink
//! stdin reader ┘    (debounce + compile)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - Source file watcher
//! - `session` - Drives the playground session and its deadline
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod session;

pub use coordinator::{Coordinator, run_until_interrupted};
