//! askguard library - ask-before-acting guard for Claude Code tool calls.
//!
//! A PreToolUse hook that lets every tool call through unless a configured
//! rule says to ask: either always, or when the call may touch paths
//! outside the project root.
//!
//! # Modules
//!
//! - [`hooks`] - Input/output types for the Claude Code hook protocol.
//! - [`permissions`] - Hook input → decision, the hook's entry point.
//! - [`policy`] - Tokenizing, path extraction and resolution, rule matching,
//!   and the decision engine.
//! - [`settings`] - Project root discovery and rule loading.
//!
//! # Example
//!
//! ```no_run
//! use askguard::hooks::HookInput;
//! use askguard::permissions::check_permission;
//! use askguard::settings::GuardSettings;
//!
//! let settings = GuardSettings::load(None);
//! let input = HookInput::from_reader(std::io::stdin().lock()).unwrap();
//! let output = check_permission(&input, &settings);
//! output.write_stdout().unwrap();
//! ```

pub mod cli;
pub mod cmd;
pub mod errors;
pub mod hooks;
pub mod permissions;
pub mod policy;
pub mod settings;
pub mod style;
pub mod tracing_init;
