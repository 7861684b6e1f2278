//! Type definitions for loaded rule settings.

use std::fmt;

use serde::Serialize;

use crate::rule::RuleEntry;

/// The scope a settings file was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsLevel {
    /// `<project>/.claude/...` - takes precedence.
    Project,
    /// `~/.claude/...` - used only when the project has no settings file.
    User,
}

impl SettingsLevel {
    /// All levels, highest priority first.
    pub fn all_by_priority() -> &'static [SettingsLevel] {
        &[SettingsLevel::Project, SettingsLevel::User]
    }
}

impl fmt::Display for SettingsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsLevel::Project => f.write_str("project"),
            SettingsLevel::User => f.write_str("user"),
        }
    }
}

/// The rule categories evaluated by the decision engine.
///
/// Immutable once loaded; an absent or unreadable settings file yields
/// [`RuleSet::default`], which contains no rules at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    /// Entries that always require confirmation.
    pub ask_always: Vec<RuleEntry>,

    /// Entries that require confirmation only when a target lies outside the project.
    pub ask_outside_project: Vec<RuleEntry>,

    /// Locations writer tools may touch even though they are outside the project.
    pub write_allow_outside_project: Vec<String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ask_always(mut self, entry: RuleEntry) -> Self {
        self.ask_always.push(entry);
        self
    }

    pub fn with_ask_outside_project(mut self, entry: RuleEntry) -> Self {
        self.ask_outside_project.push(entry);
        self
    }

    pub fn with_write_allow(mut self, location: impl Into<String>) -> Self {
        self.write_allow_outside_project.push(location.into());
        self
    }

    /// True when no category holds any rule.
    pub fn is_empty(&self) -> bool {
        self.ask_always.is_empty()
            && self.ask_outside_project.is_empty()
            && self.write_allow_outside_project.is_empty()
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.ask_always.len()
            + self.ask_outside_project.len()
            + self.write_allow_outside_project.len()
    }
}
