//! Directory reading operations.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// Reads the immediate contents of a directory and returns them as [`FileEntry`] values.
///
/// The returned entries are **unsorted** and unfiltered apart from the
/// implicit `.`/`..`, which the platform never yields. Use
/// [`crate::nav::listing::list_directory`] for the full pipeline.
///
/// Symlinks are followed for type and size, so a link to a directory is
/// listed as a directory. Dangling links are listed with their own metadata.
///
/// # Errors
///
/// - [`CoreError::NotFound`]: the path does not exist.
/// - [`CoreError::NotADirectory`]: the path is not a directory.
/// - [`CoreError::PermissionDenied`]: read access is denied.
/// - [`CoreError::Io`]: any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use filelight_core::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("/srv/files")).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path) -> CoreResult<Vec<FileEntry>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(path, e))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let entry_path = dir_entry.path();
        let link_meta = match std::fs::symlink_metadata(&entry_path) {
            Ok(m) => m,
            Err(_) => continue,
        };
        let is_symlink = link_meta.file_type().is_symlink();
        let metadata = if is_symlink {
            std::fs::metadata(&entry_path).unwrap_or(link_meta)
        } else {
            link_meta
        };
        entries.push(FileEntry::new(entry_path, &metadata).with_symlink(is_symlink));
    }

    tracing::debug!(dir = %path.display(), count = entries.len(), "directory scanned");
    Ok(entries)
}
