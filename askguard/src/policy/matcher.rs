//! Rule matching primitives.

use std::sync::LazyLock;

use guard_settings::{EntryKind, RuleEntry};
use regex::Regex;

use crate::policy::invocation::{Invocation, ToolKind};

/// Characters that may end a prefix match: whitespace and shell operators.
const PREFIX_BOUNDARY: &[char] = &[' ', '\t', ';', '&', '|'];

static SUDO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^sudo\s+").expect("valid regex"));
static ENV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^env\s+").expect("valid regex"));

/// Does `command` start with `prefix` at a word or operator boundary?
///
/// `git` matches `git`, `git status` and `git;ls`, but not `gitx status`.
pub fn matches_shell_prefix(command: &str, prefix: &str) -> bool {
    if command.is_empty() || prefix.is_empty() {
        return false;
    }
    match command.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with(PREFIX_BOUNDARY),
        None => false,
    }
}

/// The command variants a prefix is tested against: the trimmed command,
/// plus the command with one leading `sudo` or `env` removed.
fn command_variants(command: &str) -> Vec<&str> {
    let trimmed = command.trim();
    let mut variants = vec![trimmed];
    if trimmed.starts_with("sudo ") {
        variants.push(&trimmed[SUDO.find(trimmed).map_or(0, |m| m.end())..]);
    }
    if trimmed.starts_with("env ") {
        variants.push(&trimmed[ENV.find(trimmed).map_or(0, |m| m.end())..]);
    }
    variants
}

/// Does any prefix match the command, directly or behind `sudo`/`env`?
pub fn matches_any_prefix<S: AsRef<str>>(command: &str, prefixes: &[S]) -> bool {
    let variants = command_variants(command);
    if variants[0].is_empty() {
        return false;
    }
    prefixes.iter().any(|prefix| {
        variants
            .iter()
            .any(|variant| matches_shell_prefix(variant, prefix.as_ref()))
    })
}

/// Tool-name glob: exact equality, or a prefix match when `pattern` ends in `*`.
pub fn matches_tool_glob(tool_name: &str, pattern: &str) -> bool {
    if tool_name == pattern {
        return true;
    }
    match pattern.strip_suffix('*') {
        Some(prefix) => tool_name.starts_with(prefix),
        None => false,
    }
}

/// Does a configured entry apply to this invocation?
///
/// - `bash` entries only see shell invocations with a non-empty command.
/// - `mcp` entries match the tool name by glob.
/// - `write` entries match a writer tool whose name equals the pattern.
pub fn entry_matches(entry: &RuleEntry, invocation: &Invocation) -> bool {
    match entry.kind() {
        EntryKind::ShellPrefix => {
            matches!(invocation.kind(), ToolKind::Shell)
                && matches_any_prefix(invocation.command(), &[entry.pattern()])
        }
        EntryKind::ToolGlob => matches_tool_glob(invocation.tool_name(), entry.pattern()),
        EntryKind::WriterTool => match invocation.kind() {
            ToolKind::Writer(kind) => kind.tool_name() == entry.pattern(),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefix_requires_boundary() {
        assert!(matches_shell_prefix("git status", "git"));
        assert!(!matches_shell_prefix("gitx status", "git"));
        assert!(matches_shell_prefix("git", "git"));
    }

    #[test]
    fn prefix_boundaries_include_operators() {
        for cmd in ["git\tlog", "git;ls", "git&& ls", "git|cat"] {
            assert!(matches_shell_prefix(cmd, "git"), "{cmd}");
        }
        assert!(!matches_shell_prefix("git-lfs pull", "git"));
        assert!(!matches_shell_prefix("git/x", "git"));
    }

    #[test]
    fn multi_word_prefix() {
        assert!(matches_shell_prefix("git push --force", "git push"));
        assert!(!matches_shell_prefix("git pull", "git push"));
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(!matches_shell_prefix("", "git"));
        assert!(!matches_shell_prefix("git", ""));
        assert!(!matches_any_prefix("   ", &["git"]));
    }

    #[test]
    fn any_prefix_sees_through_sudo_and_env() {
        assert!(matches_any_prefix("sudo rm -rf /tmp/x", &["rm"]));
        assert!(matches_any_prefix("env   git push", &["git"]));
        assert!(matches_any_prefix("  rm x  ", &["ls", "rm"]));
        assert!(!matches_any_prefix("sudo env rm x", &["rm"]));
        assert!(!matches_any_prefix("sudoku solve", &["solve"]));
    }

    #[test]
    fn any_prefix_still_matches_sudo_itself() {
        assert!(matches_any_prefix("sudo rm x", &["sudo"]));
    }

    #[test]
    fn tool_glob() {
        assert!(matches_tool_glob("mcp__github__create", "mcp__github__create"));
        assert!(matches_tool_glob("mcp__github__create", "mcp__github__*"));
        assert!(matches_tool_glob("anything", "*"));
        assert!(!matches_tool_glob("mcp__gitlab__x", "mcp__github__*"));
        assert!(!matches_tool_glob("mcp__github__create", "mcp__github__"));
    }

    #[test]
    fn bash_entry_only_matches_shell() {
        let entry = RuleEntry::bash("rm");
        assert!(entry_matches(&entry, &Invocation::shell("rm -rf x")));
        assert!(!entry_matches(&entry, &Invocation::shell("")));
        assert!(!entry_matches(
            &entry,
            &Invocation::new("mcp__shell__run", json!({"command": "rm -rf x"}))
        ));
    }

    #[test]
    fn mcp_entry_matches_by_glob() {
        let entry = RuleEntry::mcp("mcp__fs__*");
        assert!(entry_matches(
            &entry,
            &Invocation::new("mcp__fs__write", json!({}))
        ));
        assert!(!entry_matches(&entry, &Invocation::new("Read", json!({}))));
    }

    #[test]
    fn write_entry_needs_writer_tool() {
        assert!(entry_matches(
            &RuleEntry::write("Edit"),
            &Invocation::new("Edit", json!({}))
        ));
        assert!(!entry_matches(
            &RuleEntry::write("Edit"),
            &Invocation::new("Write", json!({}))
        ));
        assert!(!entry_matches(
            &RuleEntry::write("Read"),
            &Invocation::new("Read", json!({}))
        ));
    }
}
