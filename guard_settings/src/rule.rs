//! Rule entries as written in the settings front-matter.
//!
//! An entry is a single line of the form `<type> <pattern>`:
//!
//! - `bash <prefix>` - shell commands starting with `<prefix>` at a word boundary
//! - `mcp <glob>` - tool names equal to `<glob>`, or prefixed by it when it ends in `*`
//! - `write <Tool>` - one of the content-writing tools (`Write`, `Edit`, `MultiEdit`)
//!
//! ```rust
//! use guard_settings::rule::{EntryKind, RuleEntry};
//!
//! let entry: RuleEntry = "bash git push".parse().unwrap();
//! assert_eq!(entry.kind(), EntryKind::ShellPrefix);
//! assert_eq!(entry.pattern(), "git push");
//! assert_eq!(entry.to_string(), "bash git push");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Which matcher an entry is evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryKind {
    /// `bash` entries: shell prefix rules.
    #[serde(rename = "bash")]
    ShellPrefix,
    /// `mcp` entries: tool-name glob rules.
    #[serde(rename = "mcp")]
    ToolGlob,
    /// `write` entries: writer-tool path scope rules.
    #[serde(rename = "write")]
    WriterTool,
}

impl EntryKind {
    /// The keyword used for this kind in settings files.
    pub fn keyword(self) -> &'static str {
        match self {
            EntryKind::ShellPrefix => "bash",
            EntryKind::ToolGlob => "mcp",
            EntryKind::WriterTool => "write",
        }
    }
}

impl FromStr for EntryKind {
    type Err = EntryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(EntryKind::ShellPrefix),
            "mcp" => Ok(EntryKind::ToolGlob),
            "write" => Ok(EntryKind::WriterTool),
            other => Err(EntryParseError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Errors from parsing a single rule entry line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryParseError {
    /// The line has a type but nothing to match against.
    #[error("entry '{0}' has no pattern (expected '<type> <pattern>')")]
    MissingPattern(String),

    /// The type keyword is not one of `bash`, `mcp`, `write`.
    #[error("unknown entry type '{0}' (expected bash, mcp or write)")]
    UnknownType(String),
}

/// A parsed `<type> <pattern>` rule entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleEntry {
    kind: EntryKind,
    pattern: String,
}

impl RuleEntry {
    pub fn new(kind: EntryKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }

    pub fn bash(prefix: impl Into<String>) -> Self {
        Self::new(EntryKind::ShellPrefix, prefix)
    }

    pub fn mcp(glob: impl Into<String>) -> Self {
        Self::new(EntryKind::ToolGlob, glob)
    }

    pub fn write(tool: impl Into<String>) -> Self {
        Self::new(EntryKind::WriterTool, tool)
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl FromStr for RuleEntry {
    type Err = EntryParseError;

    /// Words are split on any whitespace and the pattern words are rejoined
    /// with single spaces, so `bash   git  push` equals `bash git push`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(keyword) = words.next() else {
            return Err(EntryParseError::MissingPattern(s.trim().to_string()));
        };
        let pattern = words.collect::<Vec<_>>().join(" ");
        if pattern.is_empty() {
            return Err(EntryParseError::MissingPattern(s.trim().to_string()));
        }
        Ok(Self {
            kind: keyword.parse()?,
            pattern,
        })
    }
}

impl fmt::Display for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.pattern)
    }
}

impl Serialize for RuleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
