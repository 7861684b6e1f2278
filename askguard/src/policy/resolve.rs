//! Candidate resolution and project containment.
//!
//! Resolution never fails: a path that cannot be canonicalized (usually
//! because it does not exist yet) keeps its lexically normalized form.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::trace;

use crate::policy::extract::{is_drive_rooted, is_os_absolute};

/// A candidate string together with where it actually points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub raw: String,
    pub absolute: PathBuf,
    pub inside_project: bool,
}

/// Turns candidate strings into absolute paths relative to a fixed project root.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    root: PathBuf,
    home: Option<PathBuf>,
}

impl TargetResolver {
    /// Creates a resolver for `project_root`, canonicalizing it once.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root: canonical_root(project_root.as_ref()),
            home: dirs::home_dir(),
        }
    }

    /// Replaces the home directory used for `~` expansion.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// The canonical project root all containment checks compare against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a candidate to an absolute path.
    ///
    /// `~` and `~/...` expand to the home directory; drive-rooted and
    /// absolute paths stand alone; anything else is joined to the project
    /// root. Symlinks are then followed when the path exists.
    pub fn resolve(&self, candidate: &str) -> PathBuf {
        let expanded = self.expand_home(candidate);
        let absolute = if is_drive_rooted(&expanded) || is_os_absolute(&expanded) {
            normalize(Path::new(&expanded))
        } else {
            normalize(&self.root.join(&expanded))
        };

        match std::fs::canonicalize(&absolute) {
            Ok(real) => real,
            Err(e) => {
                trace!(path = %absolute.display(), error = %e, "Falling back to lexical path");
                absolute
            }
        }
    }

    /// Resolve a candidate and test it against the project root.
    pub fn resolve_target(&self, candidate: &str) -> ResolvedTarget {
        let absolute = self.resolve(candidate);
        ResolvedTarget {
            raw: candidate.to_string(),
            inside_project: is_inside(&absolute, &self.root),
            absolute,
        }
    }

    fn expand_home(&self, candidate: &str) -> String {
        let Some(home) = self.home.as_deref() else {
            return candidate.to_string();
        };
        if candidate == "~" {
            home.to_string_lossy().into_owned()
        } else if let Some(rest) = candidate.strip_prefix("~/") {
            home.join(rest).to_string_lossy().into_owned()
        } else {
            candidate.to_string()
        }
    }
}

/// Canonicalize the project root, or normalize it against the current
/// directory when it does not exist.
pub fn canonical_root(root: &Path) -> PathBuf {
    if let Ok(real) = std::fs::canonicalize(root) {
        return real;
    }
    if root.is_absolute() {
        normalize(root)
    } else {
        let cwd = std::env::current_dir().unwrap_or_default();
        normalize(&cwd.join(root))
    }
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                None | Some(Component::ParentDir | Component::CurDir) => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// The path that leads from `base` to `target`, when both share a root.
///
/// Returns `None` when the two are on different roots or prefixes, e.g.
/// different Windows drives, so no relative path exists.
pub fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    let mut base_parts = base.components().peekable();
    let mut target_parts = target.components().peekable();

    // Roots and prefixes must agree exactly.
    while let (Some(b), Some(t)) = (base_parts.peek(), target_parts.peek()) {
        if b != t {
            break;
        }
        base_parts.next();
        target_parts.next();
    }

    let rooted = |c: &Component<'_>| matches!(c, Component::Prefix(_) | Component::RootDir);
    if base_parts.peek().is_some_and(rooted) || target_parts.peek().is_some_and(rooted) {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in base_parts {
        rel.push("..");
    }
    for part in target_parts {
        rel.push(part.as_os_str());
    }
    Some(rel)
}

/// Whether `target` lies at or below `root`.
///
/// Both paths are expected to be absolute and normalized. The root itself
/// counts as inside.
pub fn is_inside(target: &Path, root: &Path) -> bool {
    match relative_path(root, target) {
        Some(rel) => {
            !matches!(rel.components().next(), Some(Component::ParentDir)) && !rel.is_absolute()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn containment_basics() {
        assert!(is_inside(Path::new("/proj/sub/file"), Path::new("/proj")));
        assert!(!is_inside(Path::new("/other/file"), Path::new("/proj")));
        assert!(is_inside(Path::new("/proj"), Path::new("/proj")));
    }

    #[test]
    fn sibling_with_shared_prefix_is_outside() {
        assert!(!is_inside(Path::new("/project-old/x"), Path::new("/project")));
    }

    #[test]
    fn parent_of_root_is_outside() {
        assert!(!is_inside(Path::new("/"), Path::new("/proj")));
    }

    #[test]
    fn dotdot_named_directory_is_inside() {
        assert!(is_inside(Path::new("/proj/..data/x"), Path::new("/proj")));
    }

    #[test]
    fn relative_path_walks_up_and_down() {
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/c/d")),
            Some(PathBuf::from("../c/d"))
        );
        assert_eq!(
            relative_path(Path::new("/a"), Path::new("/a")),
            Some(PathBuf::new())
        );
    }

    #[test]
    fn relative_path_needs_a_shared_root() {
        assert_eq!(relative_path(Path::new("/a"), Path::new("b/c")), None);
        assert_eq!(relative_path(Path::new("b"), Path::new("/a")), None);
        assert!(!is_inside(Path::new("b/c"), Path::new("/a")));
    }

    #[cfg(windows)]
    #[test]
    fn different_drives_have_no_relative_path() {
        assert_eq!(relative_path(Path::new(r"C:\proj"), Path::new(r"D:\proj\x")), None);
        assert!(!is_inside(Path::new(r"D:\proj\x"), Path::new(r"C:\proj")));
    }

    #[cfg(unix)]
    #[test]
    fn drive_rooted_candidate_is_not_joined_to_root() {
        let resolver = TargetResolver::new("/nonexistent-proj").with_home(None);
        for candidate in [r"C:\x", "C:/x"] {
            let target = resolver.resolve_target(candidate);
            assert!(
                !target.absolute.starts_with("/nonexistent-proj"),
                "{candidate}: {}",
                target.absolute.display()
            );
            assert!(!target.inside_project, "{candidate}");
        }
        assert_eq!(resolver.resolve(r"C:\x"), PathBuf::from(r"C:\x"));
    }

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("/proj/../etc/b")), PathBuf::from("/etc/b"));
    }

    #[test]
    fn resolve_relative_against_root() {
        let resolver = TargetResolver::new("/nonexistent-proj").with_home(None);
        assert_eq!(resolver.resolve("./x"), PathBuf::from("/nonexistent-proj/x"));
        assert_eq!(resolver.resolve("../y"), PathBuf::from("/y"));
        assert_eq!(resolver.resolve("."), PathBuf::from("/nonexistent-proj"));
    }

    #[test]
    fn resolve_expands_home() {
        let resolver =
            TargetResolver::new("/nonexistent-proj").with_home(Some("/nonexistent-home".into()));
        assert_eq!(resolver.resolve("~"), PathBuf::from("/nonexistent-home"));
        assert_eq!(
            resolver.resolve("~/notes/a.md"),
            PathBuf::from("/nonexistent-home/notes/a.md")
        );
    }

    #[test]
    fn resolve_target_flags_outside() {
        let resolver = TargetResolver::new("/nonexistent-proj").with_home(None);
        let inside = resolver.resolve_target("src/lib.rs");
        assert!(inside.inside_project);
        let outside = resolver.resolve_target("/nonexistent-etc/b");
        assert!(!outside.inside_project);
        assert_eq!(outside.raw, "/nonexistent-etc/b");
    }

    #[cfg(unix)]
    #[test]
    fn resolve_follows_symlinks_out_of_project() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let project = temp.path().join("project");
        let outside = temp.path().join("outside");
        std::fs::create_dir_all(&project)?;
        std::fs::create_dir_all(&outside)?;
        std::os::unix::fs::symlink(&outside, project.join("escape"))?;

        let resolver = TargetResolver::new(&project);
        let target = resolver.resolve_target("escape");
        assert!(!target.inside_project);
        assert_eq!(target.absolute, std::fs::canonicalize(&outside)?);
        Ok(())
    }

    #[test]
    fn existing_root_is_canonicalized() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let nested = temp.path().join("a");
        std::fs::create_dir_all(&nested)?;
        let resolver = TargetResolver::new(nested.join("..").join("a"));
        assert_eq!(resolver.root(), std::fs::canonicalize(&nested)?);
        Ok(())
    }
}
