//! Path confinement: resolving root-relative paths without escaping the root.

use std::path::{Component, Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// A canonical browsing root.
///
/// The root is canonicalized exactly once, in [`ConfinedRoot::new`]. Every
/// later [`confine`](ConfinedRoot::confine) call is checked against this
/// physical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfinedRoot {
    root: PathBuf,
}

/// A path that is known to resolve inside a [`ConfinedRoot`].
///
/// Only [`ConfinedRoot`] can construct one, so holding a `ConfinedPath`
/// means the confinement check has already passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfinedPath {
    absolute: PathBuf,
    relative: String,
}

impl ConfinedRoot {
    /// Canonicalizes `path` and uses it as the browsing root.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the path does not exist.
    /// - [`CoreError::NotADirectory`] if it is not a directory.
    pub fn new(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let root = path
            .canonicalize()
            .map_err(|e| CoreError::from_io(path, e))?;
        if !root.is_dir() {
            return Err(CoreError::NotADirectory(root));
        }
        tracing::debug!(root = %root.display(), "browsing root resolved");
        Ok(Self { root })
    }

    /// Returns the canonical root path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves `relative` against the root.
    ///
    /// Leading and trailing `/` and `\` are stripped first; an empty string
    /// resolves to the root itself. The joined path is canonicalized against
    /// the real filesystem, so `..` segments and symlinks are followed before
    /// the containment check.
    ///
    /// # Errors
    ///
    /// [`CoreError::Forbidden`] if the path does not exist or resolves
    /// outside the root.
    pub fn confine(&self, relative: &str) -> CoreResult<ConfinedPath> {
        let trimmed = relative.trim_matches(|c| c == '/' || c == '\\');
        let joined = if trimmed.is_empty() {
            self.root.clone()
        } else {
            self.root.join(trimmed)
        };

        let canonical = match joined.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(requested = relative, error = %e, "path does not resolve");
                return Err(CoreError::Forbidden(relative.to_string()));
            }
        };

        // Component-wise: equal to the root, or root followed by a separator.
        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                requested = relative,
                resolved = %canonical.display(),
                "path escapes browsing root"
            );
            return Err(CoreError::Forbidden(relative.to_string()));
        }

        let relative = relative_form(&self.root, &canonical);
        Ok(ConfinedPath {
            absolute: canonical,
            relative,
        })
    }

    /// Resolves `relative` and requires the result to be a directory.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Forbidden`] as for [`confine`](Self::confine).
    /// - [`CoreError::NotADirectory`] if the target is a file.
    pub fn confine_dir(&self, relative: &str) -> CoreResult<ConfinedPath> {
        let confined = self.confine(relative)?;
        if !confined.absolute.is_dir() {
            return Err(CoreError::NotADirectory(confined.absolute));
        }
        Ok(confined)
    }

    /// Resolves `relative` and requires the result to be a regular file.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Forbidden`] as for [`confine`](Self::confine).
    /// - [`CoreError::NotFound`] if the target is a directory.
    pub fn confine_file(&self, relative: &str) -> CoreResult<ConfinedPath> {
        let confined = self.confine(relative)?;
        if !confined.absolute.is_file() {
            return Err(CoreError::NotFound(confined.absolute));
        }
        Ok(confined)
    }
}

impl ConfinedPath {
    /// The canonical absolute path.
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    /// The path relative to the root, `/`-separated. Empty for the root.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Returns `true` if this path is the root itself.
    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }
}

impl AsRef<Path> for ConfinedPath {
    fn as_ref(&self) -> &Path {
        &self.absolute
    }
}

fn relative_form(root: &Path, canonical: &Path) -> String {
    canonical
        .strip_prefix(root)
        .map(|rest| {
            rest.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ConfinedRoot) {
        let tmp = TempDir::new().unwrap();
        let root_dir = tmp.path().join("root");
        fs::create_dir_all(root_dir.join("docs/nested")).unwrap();
        fs::write(root_dir.join("docs/readme.txt"), "hi").unwrap();
        fs::write(tmp.path().join("outside.txt"), "secret").unwrap();
        let root = ConfinedRoot::new(&root_dir).unwrap();
        (tmp, root)
    }

    #[test]
    fn new_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = ConfinedRoot::new(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn new_rejects_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = ConfinedRoot::new(&file).unwrap_err();
        assert!(matches!(err, CoreError::NotADirectory(_)));
    }

    #[test]
    fn empty_path_is_root() {
        let (_tmp, root) = setup();
        let confined = root.confine("").unwrap();
        assert_eq!(confined.as_path(), root.path());
        assert!(confined.is_root());
        assert_eq!(confined.relative(), "");
    }

    #[test]
    fn separators_only_is_root() {
        let (_tmp, root) = setup();
        assert_eq!(root.confine("/").unwrap().as_path(), root.path());
        assert_eq!(root.confine("//\\").unwrap().as_path(), root.path());
    }

    #[test]
    fn subdirectory_resolves() {
        let (_tmp, root) = setup();
        let confined = root.confine("/docs/nested/").unwrap();
        assert_eq!(confined.as_path(), root.path().join("docs/nested"));
        assert_eq!(confined.relative(), "docs/nested");
    }

    #[test]
    fn dot_dot_inside_root_collapses() {
        let (_tmp, root) = setup();
        let confined = root.confine("docs/nested/..").unwrap();
        assert_eq!(confined.relative(), "docs");
    }

    #[test]
    fn dot_dot_escape_is_forbidden() {
        let (_tmp, root) = setup();
        for attempt in ["..", "../", "docs/../..", "docs/nested/../../../outside.txt", "../root/../.."] {
            let err = root.confine(attempt).unwrap_err();
            assert!(
                matches!(err, CoreError::Forbidden(_)),
                "expected Forbidden for {attempt:?}"
            );
        }
    }

    #[test]
    fn missing_path_is_forbidden() {
        let (_tmp, root) = setup();
        let err = root.confine("docs/missing").unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(p) if p == "docs/missing"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escape_is_forbidden() {
        let (tmp, root) = setup();
        std::os::unix::fs::symlink(tmp.path(), root.path().join("escape")).unwrap();
        let err = root.confine("escape").unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[cfg(unix)]
    #[test]
    fn sibling_with_shared_prefix_is_forbidden() {
        let (tmp, root) = setup();
        let sibling = tmp.path().join("rootkit");
        fs::create_dir(&sibling).unwrap();
        std::os::unix::fs::symlink(&sibling, root.path().join("kit")).unwrap();
        let err = root.confine("kit").unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_within_root_is_allowed() {
        let (_tmp, root) = setup();
        std::os::unix::fs::symlink(root.path().join("docs"), root.path().join("alias")).unwrap();
        let confined = root.confine("alias").unwrap();
        assert_eq!(confined.relative(), "docs");
    }

    #[test]
    fn confine_dir_rejects_file() {
        let (_tmp, root) = setup();
        let err = root.confine_dir("docs/readme.txt").unwrap_err();
        assert!(matches!(err, CoreError::NotADirectory(_)));
    }

    #[test]
    fn confine_file_accepts_file_and_rejects_dir() {
        let (_tmp, root) = setup();
        let file = root.confine_file("docs/readme.txt").unwrap();
        assert_eq!(file.relative(), "docs/readme.txt");

        let err = root.confine_file("docs").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
