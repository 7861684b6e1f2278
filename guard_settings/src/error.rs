//! Error types for the rule settings loader.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when locating or reading askguard rule files.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read a settings file.
    #[error("failed to read settings from {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file not found.
    #[error("settings file not found at {0}")]
    NotFound(PathBuf),

    /// Permission denied when accessing a settings file.
    #[error("permission denied accessing settings at {path}: {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front-matter block is not valid YAML.
    #[error("failed to parse front-matter in {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A front-matter key holds something other than a list.
    #[error("key '{key}' in {path} must be a list of strings")]
    NotAList { path: PathBuf, key: String },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// Failed to determine project directory.
    #[error("could not determine project directory: {0}")]
    NoProjectDirectory(String),
}

impl SettingsError {
    /// An actionable suggestion for the user, if one applies.
    pub fn help(&self) -> Option<String> {
        match self {
            SettingsError::ParseError { .. } => Some(
                "the block between the leading '---' lines must be YAML, e.g.\n\
                 ---\n\
                 ask_always:\n  - bash rm\n\
                 ---"
                .into(),
            ),
            SettingsError::NotAList { key, .. } => Some(format!(
                "write '{key}' as a YAML list: one '- <type> <pattern>' item per line"
            )),
            SettingsError::PermissionDenied { path, .. } => {
                Some(format!("check the file permissions of {}", path.display()))
            }
            SettingsError::NoHomeDirectory => {
                Some("set $HOME so user-scope settings can be found".into())
            }
            SettingsError::NoProjectDirectory(_) => {
                Some("set CLAUDE_PROJECT_DIR or pass --project-dir".into())
            }
            SettingsError::ReadError { .. } | SettingsError::NotFound(_) => None,
        }
    }
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_no_hint() {
        let err = SettingsError::NotFound(PathBuf::from("/x/.asklist.md"));
        assert_eq!(err.to_string(), "settings file not found at /x/.asklist.md");
        assert!(err.help().is_none());
    }

    #[test]
    fn not_a_list_hint_names_the_key() {
        let err = SettingsError::NotAList {
            path: PathBuf::from("/p/.asklist.md"),
            key: "ask_always".into(),
        };
        assert!(err.help().unwrap().contains("ask_always"));
    }
}
