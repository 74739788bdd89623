//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

use crate::fs::classify::{classify, Classification};

/// A single file or directory entry in a listing.
///
/// Entries are rebuilt for every listing request; the name is the only
/// identity they carry. Directory sizes are reported as `0`.
///
/// # Examples
///
/// ```no_run
/// use filelight_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = FileEntry::new("Cargo.toml".into(), &metadata);
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    size: u64,
    modified: Option<SystemTime>,
    is_dir: bool,
    is_symlink: bool,
    kind: Classification,
    description: Option<String>,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// `metadata` should follow symlinks so that a link to a directory is
    /// listed as a directory. Names are normalised to NFC.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let is_dir = metadata.is_dir();
        let kind = classify(&name, is_dir);

        Self {
            path,
            name,
            size: if is_dir { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
            is_dir,
            is_symlink: metadata.is_symlink(),
            kind,
            description: None,
        }
    }

    /// Builds an entry from already-known parts, without touching the disk.
    pub fn from_parts(
        path: PathBuf,
        size: u64,
        modified: Option<SystemTime>,
        is_dir: bool,
    ) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let kind = classify(&name, is_dir);
        Self {
            path,
            name,
            size: if is_dir { 0 } else { size },
            modified,
            is_dir,
            is_symlink: false,
            kind,
            description: None,
        }
    }

    /// Marks the entry as reached through a symbolic link.
    #[must_use]
    pub fn with_symlink(mut self, is_symlink: bool) -> Self {
        self.is_symlink = is_symlink;
        self
    }

    /// Attaches a description. Empty descriptions are treated as absent.
    #[must_use]
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .filter(|d| !d.is_empty())
            .map(str::to_owned);
        self
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Type label, icon and colour.
    pub fn kind(&self) -> &Classification {
        &self.kind
    }

    /// Shorthand for `kind().label`.
    pub fn type_label(&self) -> &str {
        &self.kind.label
    }

    /// The sidecar description, if one is set.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_entry_from_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("test.txt");
        fs::write(&file_path, "hello").unwrap();

        let metadata = fs::metadata(&file_path).unwrap();
        let entry = FileEntry::new(file_path.clone(), &metadata);

        assert_eq!(entry.name(), "test.txt");
        assert_eq!(entry.size(), 5);
        assert!(!entry.is_dir());
        assert_eq!(entry.path(), file_path);
        assert!(entry.modified().is_some());
        assert_eq!(entry.type_label(), "Text");
        assert!(entry.description().is_none());
    }

    #[test]
    fn file_entry_from_directory() {
        let tmp = TempDir::new().unwrap();
        let dir_path = tmp.path().join("subdir.zip");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("a.txt"), "data").unwrap();

        let metadata = fs::metadata(&dir_path).unwrap();
        let entry = FileEntry::new(dir_path, &metadata);

        assert_eq!(entry.name(), "subdir.zip");
        assert_eq!(entry.size(), 0);
        assert!(entry.is_dir());
        assert_eq!(entry.type_label(), "Dir");
    }

    #[test]
    fn file_entry_unicode_name() {
        let tmp = TempDir::new().unwrap();
        let file_path = tmp.path().join("한글파일.txt");
        fs::write(&file_path, "내용").unwrap();

        let metadata = fs::metadata(&file_path).unwrap();
        let entry = FileEntry::new(file_path, &metadata);

        assert_eq!(entry.name(), "한글파일.txt");
    }

    #[test]
    fn from_parts_zeroes_directory_size() {
        let entry = FileEntry::from_parts(PathBuf::from("/srv/docs"), 4096, None, true);
        assert!(entry.is_dir());
        assert_eq!(entry.size(), 0);
        assert_eq!(entry.name(), "docs");
    }

    #[test]
    fn with_description_drops_empty() {
        let entry = FileEntry::from_parts(PathBuf::from("/a.txt"), 1, None, false);
        assert!(entry.clone().with_description(Some("")).description().is_none());
        assert_eq!(
            entry.with_description(Some("notes")).description(),
            Some("notes")
        );
    }

    #[test]
    fn with_symlink_sets_flag() {
        let entry = FileEntry::from_parts(PathBuf::from("/a.txt"), 1, None, false)
            .with_symlink(true);
        assert!(entry.is_symlink());
    }
}
