//! File I/O for askguard settings.
//!
//! Reads a settings file, parses its front-matter, and converts the named
//! list keys into a [`RuleSet`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{Level, instrument, warn};

use crate::error::{Result, SettingsError};
use crate::frontmatter::{FrontMatter, ListError};
use crate::paths::PathResolver;
use crate::rule::RuleEntry;
use crate::types::{RuleSet, SettingsLevel};

pub const ASK_ALWAYS_KEY: &str = "ask_always";
pub const ASK_OUTSIDE_PROJECT_KEY: &str = "ask_outside_project";
pub const WRITE_ALLOW_OUTSIDE_PROJECT_KEY: &str = "write_allow_outside_project";

/// Parses settings file content into a rule set.
///
/// Invalid entries are logged and skipped; only a broken front-matter block
/// or a key that is not a list fails the whole file.
#[instrument(level = Level::TRACE, skip(content))]
pub fn parse_rules(path: &Path, content: &str) -> Result<RuleSet> {
    let front = FrontMatter::parse(content).map_err(|source| SettingsError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;

    let list = |key: &str| {
        front.list(key).map_err(|ListError::NotAList| SettingsError::NotAList {
            path: path.to_path_buf(),
            key: key.to_string(),
        })
    };

    Ok(RuleSet {
        ask_always: parse_entries(path, ASK_ALWAYS_KEY, list(ASK_ALWAYS_KEY)?),
        ask_outside_project: parse_entries(
            path,
            ASK_OUTSIDE_PROJECT_KEY,
            list(ASK_OUTSIDE_PROJECT_KEY)?,
        ),
        write_allow_outside_project: list(WRITE_ALLOW_OUTSIDE_PROJECT_KEY)?,
    })
}

fn parse_entries(path: &Path, key: &str, lines: Vec<String>) -> Vec<RuleEntry> {
    lines
        .into_iter()
        .filter_map(|line| match line.parse::<RuleEntry>() {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), key, error = %e, "Skipping invalid rule entry");
                None
            }
        })
        .collect()
}

/// Reads a rule set from a specific file path.
#[instrument(level = Level::TRACE)]
pub fn read_rules_from_path(path: &Path) -> Result<RuleSet> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SettingsError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => SettingsError::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        },
        _ => SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_rules(path, &content)
}

/// Reads a rule set from a specific file path, returning None if not found.
#[instrument(level = Level::TRACE)]
pub fn read_rules_from_path_optional(path: &Path) -> Result<Option<RuleSet>> {
    match read_rules_from_path(path) {
        Ok(rules) => Ok(Some(rules)),
        Err(SettingsError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Rule reader that uses a PathResolver for path resolution.
#[derive(Debug, Clone, Default)]
pub struct SettingsIO {
    resolver: PathResolver,
}

impl SettingsIO {
    /// Creates a SettingsIO with a custom PathResolver.
    pub fn with_resolver(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Finds the highest-priority settings file that exists and reads it.
    ///
    /// Scopes are not merged: the winning file supplies every category.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn read_effective(&self) -> Result<Option<(SettingsLevel, PathBuf, RuleSet)>> {
        for (level, path) in self.resolver.all_settings_paths()? {
            if let Some(rules) = read_rules_from_path_optional(&path)? {
                return Ok(Some((level, path, rules)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_io() -> (TempDir, SettingsIO) {
        let temp = TempDir::new().unwrap();
        let resolver = PathResolver::new()
            .with_home(temp.path().join("home"))
            .with_project(temp.path().join("project"));
        (temp, SettingsIO::with_resolver(resolver))
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn parse_rules_reads_all_categories() {
        let content = "---\nask_always:\n  - bash rm\nask_outside_project:\n  - bash cp\n  - write Write\nwrite_allow_outside_project:\n  - ~/scratch\n---\n";
        let rules = parse_rules(Path::new("x.md"), content).unwrap();
        assert_eq!(rules.ask_always, vec![RuleEntry::bash("rm")]);
        assert_eq!(
            rules.ask_outside_project,
            vec![RuleEntry::bash("cp"), RuleEntry::write("Write")]
        );
        assert_eq!(rules.write_allow_outside_project, vec!["~/scratch"]);
    }

    #[test]
    fn parse_rules_skips_invalid_entries() {
        let content = "---\nask_always:\n  - bash\n  - sudo rm\n  - mcp mcp__x__*\n---\n";
        let rules = parse_rules(Path::new("x.md"), content).unwrap();
        assert_eq!(rules.ask_always, vec![RuleEntry::mcp("mcp__x__*")]);
    }

    #[test]
    fn parse_rules_rejects_scalar_key() {
        let err = parse_rules(Path::new("x.md"), "---\nask_always: bash rm\n---\n").unwrap_err();
        assert!(matches!(err, SettingsError::NotAList { ref key, .. } if key == "ask_always"));
    }

    #[test]
    fn missing_file_is_none() {
        let (temp, _) = setup_test_io();
        let result = read_rules_from_path_optional(&temp.path().join("nope.md")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn project_level_wins_over_user() {
        let (temp, io) = setup_test_io();
        write(
            &temp.path().join("home/.claude/ask-dangerous-tool.local.md"),
            "---\nask_always:\n  - bash user-rule\n---\n",
        );
        write(
            &temp.path().join("project/.claude/ask-dangerous-tool.local.md"),
            "---\nask_always:\n  - bash project-rule\n---\n",
        );

        let (level, path, rules) = io.read_effective().unwrap().unwrap();
        assert_eq!(level, SettingsLevel::Project);
        assert!(path.ends_with("project/.claude/ask-dangerous-tool.local.md"));
        assert_eq!(rules.ask_always, vec![RuleEntry::bash("project-rule")]);
    }

    #[test]
    fn legacy_project_file_is_found() {
        let (temp, io) = setup_test_io();
        write(
            &temp.path().join("project/.asklist.md"),
            "---\nask_outside_project:\n  - bash mv\n---\n",
        );

        let (level, path, rules) = io.read_effective().unwrap().unwrap();
        assert_eq!(level, SettingsLevel::Project);
        assert!(path.ends_with("project/.asklist.md"));
        assert_eq!(rules.ask_outside_project, vec![RuleEntry::bash("mv")]);
    }

    #[test]
    fn falls_back_to_user_level() {
        let (temp, io) = setup_test_io();
        write(
            &temp.path().join("home/.claude/.asklist.md"),
            "---\nask_always:\n  - bash shutdown\n---\n",
        );

        let (level, _, rules) = io.read_effective().unwrap().unwrap();
        assert_eq!(level, SettingsLevel::User);
        assert_eq!(rules.ask_always, vec![RuleEntry::bash("shutdown")]);
    }

    #[test]
    fn nothing_configured_is_none() {
        let (_temp, io) = setup_test_io();
        assert!(io.read_effective().unwrap().is_none());
    }
}
