//! # Guard Settings
//!
//! Loads the rule configuration consumed by askguard's decision engine.
//!
//! ## Overview
//!
//! Settings are Markdown files with a YAML front-matter block, looked up at
//! two levels:
//!
//! 1. **Project** (`<project>/.claude/ask-dangerous-tool.local.md`, legacy `<project>/.asklist.md`)
//! 2. **User** (`~/.claude/ask-dangerous-tool.local.md`, legacy `~/.claude/.asklist.md`)
//!
//! The first file that exists supplies the whole [`RuleSet`]; levels are
//! not merged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guard_settings::{PathResolver, SettingsLoader};
//!
//! let loader = SettingsLoader::with_resolver(PathResolver::new().with_project("/my/project"));
//! let loaded = loader.load();
//! println!("{} rules from {:?}", loaded.rules.len(), loaded.source);
//! ```

pub mod error;
pub mod frontmatter;
pub mod io;
pub mod paths;
pub mod rule;
pub mod types;

pub use error::{Result, SettingsError};
pub use io::SettingsIO;
pub use paths::PathResolver;
pub use rule::{EntryKind, EntryParseError, RuleEntry};
pub use types::{RuleSet, SettingsLevel};

use std::path::PathBuf;

use serde::Serialize;
use tracing::{Level, info, instrument, warn};

/// Where a loaded rule set came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSource {
    pub level: SettingsLevel,
    pub path: PathBuf,
}

/// A rule set together with the file it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadedRules {
    pub rules: RuleSet,
    /// `None` when no settings file exists at any level.
    pub source: Option<SettingsSource>,
}

/// High-level entry point for loading rule settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    io: SettingsIO,
}

impl SettingsLoader {
    /// Creates a loader with a custom path resolver.
    ///
    /// ```rust
    /// use guard_settings::{PathResolver, SettingsLoader};
    ///
    /// let resolver = PathResolver::new()
    ///     .with_home("/custom/home")
    ///     .with_project("/custom/project");
    ///
    /// let loader = SettingsLoader::with_resolver(resolver);
    /// ```
    pub fn with_resolver(resolver: PathResolver) -> Self {
        Self {
            io: SettingsIO::with_resolver(resolver),
        }
    }

    /// Loads the effective rule set, failing on unreadable or malformed files.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn try_load(&self) -> Result<LoadedRules> {
        Ok(match self.io.read_effective()? {
            Some((level, path, rules)) => {
                info!(%level, path = %path.display(), rules = rules.len(), "Loaded rule settings");
                LoadedRules {
                    rules,
                    source: Some(SettingsSource { level, path }),
                }
            }
            None => LoadedRules::default(),
        })
    }

    /// Loads the effective rule set, degrading to an empty one on any error.
    #[instrument(level = Level::TRACE, skip(self))]
    pub fn load(&self) -> LoadedRules {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load rule settings; continuing with no rules");
            LoadedRules::default()
        })
    }
}
