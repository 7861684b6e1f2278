//! Decision engine: RuleSet × Invocation → Decision.
//!
//! Categories are evaluated in a fixed order and the first decisive one wins:
//!
//! 1. `ask_always` - any matching entry asks, regardless of paths.
//! 2. `ask_outside_project` - the first matching entry collects the
//!    invocation's targets and asks if any resolves outside the project,
//!    otherwise allows.
//! 3. Nothing matched - allow.

use std::path::PathBuf;

use guard_settings::{RuleEntry, RuleSet};
use tracing::{Level, debug, instrument};

use crate::policy::extract::{
    collect_path_candidates_from_input, collect_writer_paths, dedup_preserving_order,
    extract_path_candidates,
};
use crate::policy::invocation::{Invocation, ToolKind};
use crate::policy::ir::{Category, Decision, DecisionTrace, Outcome};
use crate::policy::matcher::entry_matches;
use crate::policy::resolve::{TargetResolver, is_inside};

/// Longest command excerpt quoted in a reason.
const REASON_COMMAND_LIMIT: usize = 100;

pub const DEFAULT_ALLOW_REASON: &str = "no matching rule; default allow.";

/// Evaluates invocations against one rule set and one project root.
#[derive(Debug)]
pub struct DecisionEngine<'a> {
    rules: &'a RuleSet,
    resolver: TargetResolver,
    /// `write_allow_outside_project`, resolved once.
    write_allow: Vec<PathBuf>,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(rules: &'a RuleSet, resolver: TargetResolver) -> Self {
        let write_allow = rules
            .write_allow_outside_project
            .iter()
            .map(|location| resolver.resolve(location))
            .collect();
        Self {
            rules,
            resolver,
            write_allow,
        }
    }

    /// Evaluate one invocation. Always produces a decision.
    #[instrument(level = Level::DEBUG, skip_all, fields(tool = invocation.tool_name()))]
    pub fn evaluate(&self, invocation: &Invocation) -> Decision {
        if let Some(entry) = self
            .rules
            .ask_always
            .iter()
            .find(|entry| entry_matches(entry, invocation))
        {
            debug!(%entry, "ask_always entry matched");
            return Decision {
                outcome: Outcome::Ask,
                reason: always_ask_reason(entry, invocation),
                trace: DecisionTrace {
                    category: Category::AskAlways,
                    entry: Some(entry.clone()),
                    outside_targets: Vec::new(),
                },
            };
        }

        if let Some(entry) = self
            .rules
            .ask_outside_project
            .iter()
            .find(|entry| entry_matches(entry, invocation))
        {
            let outside = self.outside_targets(invocation);
            debug!(%entry, outside = ?outside, "ask_outside_project entry matched");
            let (outcome, reason) = if outside.is_empty() {
                (
                    Outcome::Allow,
                    format!("matched entry '{entry}' but no outside-project paths detected"),
                )
            } else {
                (Outcome::Ask, outside_reason(entry, invocation, &outside))
            };
            return Decision {
                outcome,
                reason,
                trace: DecisionTrace {
                    category: Category::AskOutsideProject,
                    entry: Some(entry.clone()),
                    outside_targets: outside,
                },
            };
        }

        debug!("no entry matched; default allow");
        Decision {
            outcome: Outcome::Allow,
            reason: DEFAULT_ALLOW_REASON.to_string(),
            trace: DecisionTrace {
                category: Category::Default,
                entry: None,
                outside_targets: Vec::new(),
            },
        }
    }

    /// Resolved targets of the invocation that lie outside the project root.
    pub fn outside_targets(&self, invocation: &Invocation) -> Vec<PathBuf> {
        let candidates = match invocation.kind() {
            ToolKind::Shell => extract_path_candidates(invocation.command()),
            ToolKind::Writer(_) => collect_writer_paths(invocation.input()),
            ToolKind::Namespaced { .. } | ToolKind::Other => {
                collect_path_candidates_from_input(invocation.input())
            }
        };
        let writer = matches!(invocation.kind(), ToolKind::Writer(_));

        let outside = dedup_preserving_order(candidates)
            .iter()
            .map(|candidate| self.resolver.resolve_target(candidate))
            .filter(|target| !target.inside_project)
            .filter(|target| !(writer && self.is_write_allowed(&target.absolute)))
            .map(|target| target.absolute)
            .collect();
        dedup_preserving_order(outside)
    }

    /// Whether a writer target is at or under an allow-listed location.
    fn is_write_allowed(&self, target: &std::path::Path) -> bool {
        self.write_allow
            .iter()
            .any(|allowed| is_inside(target, allowed))
    }
}

fn subject_line(invocation: &Invocation) -> String {
    match invocation.kind() {
        ToolKind::Shell => format!(
            "command: {}",
            truncate_for_reason(invocation.command(), REASON_COMMAND_LIMIT)
        ),
        _ => format!("tool: {}", invocation.tool_name()),
    }
}

fn always_ask_reason(entry: &RuleEntry, invocation: &Invocation) -> String {
    [
        "requires confirmation every time".to_string(),
        format!("entry: {entry}"),
        subject_line(invocation),
    ]
    .join("\n")
}

fn outside_reason(entry: &RuleEntry, invocation: &Invocation, outside: &[PathBuf]) -> String {
    let targets = outside
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    [
        "may touch paths outside the project".to_string(),
        format!("entry: {entry}"),
        subject_line(invocation),
        format!("targets: {targets}"),
    ]
    .join("\n")
}

/// Cut `value` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_for_reason(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
