//! Ask-list policy: decide whether a tool invocation runs silently or asks.
//!
//! Three rule categories, evaluated in order: `ask_always`,
//! `ask_outside_project`, then a default allow. Path checks resolve every
//! candidate against the project root and follow symlinks when the target
//! exists.

pub mod engine;
pub mod extract;
pub mod invocation;
pub mod ir;
pub mod matcher;
pub mod resolve;
pub mod tokenize;

pub use engine::{DEFAULT_ALLOW_REASON, DecisionEngine};
pub use invocation::{Invocation, ToolKind, WriterKind};
pub use ir::{Category, Decision, DecisionTrace, Outcome};
pub use resolve::{ResolvedTarget, TargetResolver};
