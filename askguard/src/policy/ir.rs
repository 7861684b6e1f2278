//! Decision types shared by the engine, the hook adapter and `explain`.

use std::fmt;
use std::path::PathBuf;

use guard_settings::RuleEntry;
use serde::Serialize;

/// The outcome of evaluating one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Let the tool run without prompting.
    Allow,
    /// Prompt the user for confirmation.
    Ask,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Allow => write!(f, "allow"),
            Outcome::Ask => write!(f, "ask"),
        }
    }
}

/// Which rule category produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AskAlways,
    AskOutsideProject,
    Default,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::AskAlways => write!(f, "ask_always"),
            Category::AskOutsideProject => write!(f, "ask_outside_project"),
            Category::Default => write!(f, "default"),
        }
    }
}

/// How a decision was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionTrace {
    pub category: Category,
    /// The entry that decided, if any.
    pub entry: Option<RuleEntry>,
    /// Resolved targets found outside the project (empty unless relevant).
    pub outside_targets: Vec<PathBuf>,
}

impl DecisionTrace {
    /// Render the trace as a list of human-readable strings.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![format!("category: {}", self.category)];
        if let Some(ref entry) = self.entry {
            lines.push(format!("matched: {entry}"));
        }
        for target in &self.outside_targets {
            lines.push(format!("outside: {}", target.display()));
        }
        lines
    }
}

/// The single result produced for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub reason: String,
    pub trace: DecisionTrace,
}
