//! Path resolution for askguard settings files.
//!
//! Each [`SettingsLevel`] has an ordered list of candidate files: the
//! current file name first, then the legacy `.asklist.md` location.

use std::env;
use std::path::PathBuf;

use crate::error::{Result, SettingsError};
use crate::types::SettingsLevel;

/// The name of the Claude settings directory.
const CLAUDE_DIR: &str = ".claude";

/// The current settings file name, stored under `.claude/` at either level.
const SETTINGS_FILE: &str = "ask-dangerous-tool.local.md";

/// The legacy settings file name. Lives at the project root for the project
/// level and under `~/.claude/` for the user level.
const LEGACY_SETTINGS_FILE: &str = ".asklist.md";

/// Resolver for askguard settings file paths.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    /// Override for the home directory (useful for testing).
    home_override: Option<PathBuf>,

    /// Override for the project directory.
    project_override: Option<PathBuf>,
}

impl PathResolver {
    /// Creates a new PathResolver with default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a PathResolver with a custom home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_override = Some(home.into());
        self
    }

    /// Creates a PathResolver with a custom project directory.
    pub fn with_project(mut self, project: impl Into<PathBuf>) -> Self {
        self.project_override = Some(project.into());
        self
    }

    /// Returns the home directory path.
    pub fn home_dir(&self) -> Result<PathBuf> {
        if let Some(ref home) = self.home_override {
            return Ok(home.clone());
        }
        dirs::home_dir().ok_or(SettingsError::NoHomeDirectory)
    }

    /// Returns the project directory path, defaulting to the current directory.
    pub fn project_dir(&self) -> Result<PathBuf> {
        if let Some(ref project) = self.project_override {
            return Ok(project.clone());
        }
        env::current_dir().map_err(|e| SettingsError::NoProjectDirectory(e.to_string()))
    }

    /// Returns the candidate settings files for a level, in lookup order.
    pub fn settings_paths(&self, level: SettingsLevel) -> Result<Vec<PathBuf>> {
        match level {
            SettingsLevel::Project => {
                let project = self.project_dir()?;
                Ok(vec![
                    project.join(CLAUDE_DIR).join(SETTINGS_FILE),
                    project.join(LEGACY_SETTINGS_FILE),
                ])
            }
            SettingsLevel::User => {
                let claude = self.home_dir()?.join(CLAUDE_DIR);
                Ok(vec![
                    claude.join(SETTINGS_FILE),
                    claude.join(LEGACY_SETTINGS_FILE),
                ])
            }
        }
    }

    /// Returns every candidate file in order of precedence (highest first).
    ///
    /// A missing home directory only drops the user level.
    pub fn all_settings_paths(&self) -> Result<Vec<(SettingsLevel, PathBuf)>> {
        let mut paths = Vec::new();

        for level in SettingsLevel::all_by_priority() {
            match self.settings_paths(*level) {
                Ok(found) => paths.extend(found.into_iter().map(|p| (*level, p))),
                Err(SettingsError::NoHomeDirectory) if *level == SettingsLevel::User => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(paths)
    }
}
