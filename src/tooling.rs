//! Tooling
//!
//! Command-line entry points over the workspace.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, OutputFormat};
