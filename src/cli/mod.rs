//! Command-line interface module.

mod args;
pub mod common;
pub mod compile;
pub mod libs;
pub mod open;
pub mod share;
pub mod watch;

pub use args::{Cli, Commands, SourceArgs};
