//! Path candidate extraction.
//!
//! Finds strings that probably name filesystem locations, either in a shell
//! command line or in a structured tool-input tree. Candidates are raw
//! strings; resolving them is [`crate::policy::resolve`]'s job.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::policy::tokenize::tokenize;

/// Flags whose following argument is always a directory or path.
const PATH_VALUE_FLAGS: &[&str] = &["-C", "--cwd", "--work-tree", "--directory"];

/// Input keys whose string value is taken as a path without further checks.
const PATH_KEYS: &[&str] = &[
    "path",
    "file_path",
    "filePath",
    "filepath",
    "target_path",
    "targetPath",
    "source_path",
    "sourcePath",
    "dest_path",
    "destPath",
    "output_path",
    "outputPath",
    "directory",
    "dir",
];

/// Input keys holding a list of paths.
const PATH_LIST_KEYS: &[&str] = &[
    "paths",
    "file_paths",
    "files",
    "targets",
    "sources",
    "destinations",
];

/// Keys the writer tools (`Write`, `Edit`, `MultiEdit`) put their target in.
const WRITER_PATH_KEYS: &[&str] = &["file_path", "path", "filePath", "filepath"];

/// Deepest nesting level the structured walk descends into (inclusive).
pub const MAX_INPUT_DEPTH: usize = 4;

static DRIVE_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]:[\\/]").expect("valid drive-root regex"));

/// True for `C:\...` or `C:/...` style paths, on any platform.
pub fn is_drive_rooted(value: &str) -> bool {
    DRIVE_ROOT.is_match(value)
}

/// True when `value` is absolute for the host OS, or rooted (`\x` on Windows).
pub fn is_os_absolute(value: &str) -> bool {
    let path = Path::new(value);
    path.is_absolute() || path.has_root()
}

/// Heuristic: does this string look like a filesystem path?
///
/// URLs, bare words, flags and numbers are not paths; anything with a `/`,
/// a home or dot prefix, or an absolute root is.
pub fn looks_like_path(value: &str) -> bool {
    if value.is_empty() || value.contains("://") {
        return false;
    }
    value == "."
        || value == ".."
        || value == "~"
        || value.starts_with("~/")
        || value.starts_with("./")
        || value.starts_with("../")
        || is_drive_rooted(value)
        || is_os_absolute(value)
        || value.contains('/')
}

/// Drop one leading and one trailing quote character, if present.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

/// Extract path-like arguments from a shell command line.
///
/// `-C dir` style flags take the next word unconditionally. `key=value`
/// words contribute only their value. Everything else is tested with
/// [`looks_like_path`].
pub fn extract_path_candidates(command: &str) -> Vec<String> {
    let tokens = tokenize(command);
    let mut candidates = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = strip_quotes(&tokens[i]);
        i += 1;
        if token.is_empty() {
            continue;
        }

        if PATH_VALUE_FLAGS.contains(&token)
            && let Some(next) = tokens.get(i).filter(|next| !next.is_empty())
        {
            candidates.push(strip_quotes(next).to_string());
            i += 1;
            continue;
        }

        if let Some(eq) = token.find('=')
            && eq > 0
        {
            let value = &token[eq + 1..];
            if looks_like_path(value) {
                candidates.push(value.to_string());
            }
            continue;
        }

        if looks_like_path(token) {
            candidates.push(token.to_string());
        }
    }

    candidates
}

/// Collect path strings from a structured tool input.
///
/// Values under [`PATH_KEYS`] and items under [`PATH_LIST_KEYS`] qualify by
/// key name alone. Other arrays and objects are walked recursively down to
/// [`MAX_INPUT_DEPTH`].
pub fn collect_path_candidates_from_input(input: &Value) -> Vec<String> {
    let mut candidates = Vec::new();
    collect_into(input, &mut candidates, 0);
    candidates
}

fn collect_into(node: &Value, candidates: &mut Vec<String>, depth: usize) {
    if depth > MAX_INPUT_DEPTH {
        return;
    }

    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let key = key.as_str();
                if PATH_KEYS.contains(&key)
                    && let Some(path) = non_blank(value)
                {
                    candidates.push(path);
                    continue;
                }
                if PATH_LIST_KEYS.contains(&key)
                    && let Value::Array(items) = value
                {
                    candidates.extend(items.iter().filter_map(non_blank));
                    continue;
                }
                descend(value, candidates, depth);
            }
        }
        Value::Array(items) => {
            for item in items {
                descend(item, candidates, depth);
            }
        }
        _ => {}
    }
}

fn descend(value: &Value, candidates: &mut Vec<String>, depth: usize) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_into(item, candidates, depth + 1);
            }
        }
        Value::Object(_) => collect_into(value, candidates, depth + 1),
        _ => {}
    }
}

/// Collect the target paths of a writer tool: the single-file keys plus
/// every `edits[*].file_path` / `edits[*].path` of a batch edit.
pub fn collect_writer_paths(input: &Value) -> Vec<String> {
    let mut candidates: Vec<String> = WRITER_PATH_KEYS
        .iter()
        .filter_map(|key| input.get(*key).and_then(non_blank))
        .collect();

    if let Some(Value::Array(edits)) = input.get("edits") {
        for edit in edits {
            for key in ["file_path", "path"] {
                if let Some(path) = edit.get(key).and_then(non_blank) {
                    candidates.push(path);
                }
            }
        }
    }

    candidates
}

/// The trimmed string value, if it is a non-blank string.
fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Remove repeated entries, keeping the first occurrence of each.
pub fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
