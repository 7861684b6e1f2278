//! Front-matter extraction for Markdown settings files.
//!
//! Settings live in the YAML block at the very top of the file:
//!
//! ```text
//! ---
//! ask_always:
//!   - bash rm
//! ask_outside_project:
//!   - bash cp
//!   - write Write
//! ---
//! Free-form notes below the block are ignored.
//! ```

use serde_yaml::Value;
use tracing::warn;

/// Returns the YAML text between the opening and closing `---` lines.
///
/// The opening delimiter must be the first line. CRLF line endings are
/// accepted. Returns `None` when there is no complete block.
pub fn extract(content: &str) -> Option<&str> {
    let rest = content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let body = &rest[..offset];
            return Some(body.trim_end_matches(['\r', '\n']));
        }
        offset += line.len();
    }
    None
}

/// A parsed front-matter block.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    root: Value,
}

/// Why [`FrontMatter::list`] could not produce a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The key is present but holds a scalar or a mapping.
    NotAList,
}

impl FrontMatter {
    /// Parses the front-matter of a Markdown document.
    ///
    /// A document without front-matter parses to an empty block.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let Some(yaml) = extract(content) else {
            return Ok(Self::default());
        };
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(Self {
            root: serde_yaml::from_str(yaml)?,
        })
    }

    /// Returns the string items of the list stored under `key`.
    ///
    /// A missing or null key is an empty list. Items are trimmed and blank
    /// items skipped. A bare `~` item is read back as the string `~`, since
    /// YAML would otherwise turn the home directory into null. Booleans,
    /// mappings and nested lists are skipped with a warning.
    pub fn list(&self, key: &str) -> Result<Vec<String>, ListError> {
        match self.root.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Sequence(items)) => Ok(items
                .iter()
                .filter_map(|item| list_item(key, item))
                .filter(|s| !s.is_empty())
                .collect()),
            Some(_) => Err(ListError::NotAList),
        }
    }
}

fn list_item(key: &str, item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("~".to_string()),
        other => {
            warn!(key, item = ?other, "Skipping non-string list item; quote it to keep it");
            None
        }
    }
}
