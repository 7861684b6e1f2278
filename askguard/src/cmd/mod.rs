//! Subcommand implementations.

pub mod explain;
pub mod hooks;
pub mod rules;
