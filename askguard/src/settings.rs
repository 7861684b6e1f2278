use std::path::{Path, PathBuf};

use anyhow::Result;
use dirs::home_dir;
use guard_settings::{LoadedRules, PathResolver, RuleSet, SettingsLoader, SettingsSource};
use tracing::{Level, debug, instrument};

use crate::policy::resolve::canonical_root;
use crate::policy::{DecisionEngine, TargetResolver};

/// Environment variables naming the project root, in precedence order.
pub const PROJECT_DIR_VARS: &[&str] = &["CLAUDE_PROJECT_DIR", "PROJECT_DIR"];

/// Everything one evaluation needs: the project root and the rules in force.
#[derive(Clone, Debug)]
pub struct GuardSettings {
    /// Canonical project root.
    pub project_root: PathBuf,
    pub rules: RuleSet,
    /// The settings file the rules came from, if any.
    pub source: Option<SettingsSource>,
}

impl GuardSettings {
    /// askguard's own state directory (`~/.askguard`), used for the log file.
    pub fn settings_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".askguard"))
    }

    /// Load settings tolerantly: configuration errors yield an empty rule set.
    #[instrument(level = Level::DEBUG)]
    pub fn load(project_dir: Option<&Path>) -> Self {
        let project_root = project_root(project_dir, |var| std::env::var(var).ok());
        let loaded = loader_for(&project_root).load();
        Self::from_loaded(project_root, loaded)
    }

    /// Load settings strictly, failing on unreadable or malformed files.
    #[instrument(level = Level::DEBUG)]
    pub fn try_load(project_dir: Option<&Path>) -> Result<Self> {
        let project_root = project_root(project_dir, |var| std::env::var(var).ok());
        let loaded = loader_for(&project_root).try_load()?;
        Ok(Self::from_loaded(project_root, loaded))
    }

    /// Settings with explicit rules, bypassing the filesystem lookup.
    pub fn with_rules(project_root: impl AsRef<Path>, rules: RuleSet) -> Self {
        Self {
            project_root: canonical_root(project_root.as_ref()),
            rules,
            source: None,
        }
    }

    fn from_loaded(project_root: PathBuf, loaded: LoadedRules) -> Self {
        debug!(root = %project_root.display(), source = ?loaded.source, "Resolved guard settings");
        Self {
            project_root,
            rules: loaded.rules,
            source: loaded.source,
        }
    }

    /// A decision engine bound to these settings.
    pub fn engine(&self) -> DecisionEngine<'_> {
        DecisionEngine::new(&self.rules, TargetResolver::new(&self.project_root))
    }
}

fn loader_for(project_root: &Path) -> SettingsLoader {
    SettingsLoader::with_resolver(PathResolver::new().with_project(project_root))
}

/// Pick the project root: explicit flag, then [`PROJECT_DIR_VARS`], then the
/// current directory. Blank values are skipped. The result is canonicalized.
pub fn project_root(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> PathBuf {
    let chosen = explicit
        .map(Path::to_path_buf)
        .or_else(|| {
            PROJECT_DIR_VARS
                .iter()
                .filter_map(|var| env(var))
                .find(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from("."));
    canonical_root(&chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guard_settings::{RuleEntry, SettingsLevel};
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn explicit_dir_beats_environment() {
        let root = project_root(Some(Path::new("/nonexistent-flag")), |_| {
            Some("/nonexistent-env".into())
        });
        assert_eq!(root, PathBuf::from("/nonexistent-flag"));
    }

    #[test]
    fn claude_project_dir_beats_project_dir() {
        let root = project_root(None, |var| match var {
            "CLAUDE_PROJECT_DIR" => Some("/nonexistent-claude".into()),
            "PROJECT_DIR" => Some("/nonexistent-plain".into()),
            _ => None,
        });
        assert_eq!(root, PathBuf::from("/nonexistent-claude"));
    }

    #[test]
    fn blank_environment_values_are_skipped() {
        let root = project_root(None, |var| match var {
            "CLAUDE_PROJECT_DIR" => Some("  ".into()),
            "PROJECT_DIR" => Some("/nonexistent-plain".into()),
            _ => None,
        });
        assert_eq!(root, PathBuf::from("/nonexistent-plain"));
    }

    #[test]
    fn falls_back_to_current_directory() {
        let cwd = std::fs::canonicalize(std::env::current_dir().unwrap()).unwrap();
        assert_eq!(project_root(None, no_env), cwd);
    }

    #[test]
    fn load_reads_project_file() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let claude_dir = temp.path().join(".claude");
        std::fs::create_dir_all(&claude_dir)?;
        std::fs::write(
            claude_dir.join("ask-dangerous-tool.local.md"),
            "---\nask_outside_project:\n  - bash cp\n---\n# notes\n",
        )?;

        let settings = GuardSettings::try_load(Some(temp.path()))?;
        assert_eq!(settings.project_root, std::fs::canonicalize(temp.path())?);
        assert_eq!(
            settings.rules.ask_outside_project,
            vec![RuleEntry::bash("cp")]
        );
        assert_eq!(
            settings.source.map(|s| s.level),
            Some(SettingsLevel::Project)
        );
        Ok(())
    }

    #[test]
    fn load_tolerates_broken_project_file() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        std::fs::write(temp.path().join(".asklist.md"), "---\nask_always: [\n---\n")?;

        assert!(GuardSettings::try_load(Some(temp.path())).is_err());
        let settings = GuardSettings::load(Some(temp.path()));
        assert!(settings.rules.is_empty());
        assert!(settings.source.is_none());
        Ok(())
    }
}
