//! Reading and writing the per-directory description sidecar.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{CoreError, CoreResult};
use crate::fs::confine::{ConfinedPath, ConfinedRoot};
use crate::meta::map::MetadataMap;
use crate::meta::parse::{parse, serialize};

/// Default sidecar file name.
pub const SIDECAR_FILE_NAME: &str = "DESCRIPT.ION";

/// Loads and saves description sidecars below a confined root.
///
/// Reads fall back from the directory's own sidecar to the root's sidecar.
/// Writes only ever touch the directory's own file and go through
/// [`update`](Self::update), which serializes concurrent edits with an
/// exclusive advisory lock.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    root: ConfinedRoot,
    file_name: String,
}

impl MetadataStore {
    /// Creates a store using [`SIDECAR_FILE_NAME`].
    pub fn new(root: ConfinedRoot) -> Self {
        Self {
            root,
            file_name: SIDECAR_FILE_NAME.to_string(),
        }
    }

    /// Overrides the sidecar file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// The sidecar file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Name of the lock file that sits next to each written sidecar.
    pub fn lock_file_name(&self) -> String {
        format!(".{}.lock", self.file_name)
    }

    /// Path of the sidecar inside `dir`.
    pub fn sidecar_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }

    /// Loads the descriptions that apply to `dir`.
    ///
    /// Uses the sidecar in `dir` if it is readable, otherwise the one at the
    /// root, otherwise an empty map. The two files are never merged.
    pub fn load(&self, dir: &ConfinedPath) -> MetadataMap {
        read_sidecar(&self.sidecar_path(dir.as_path()))
            .or_else(|| read_sidecar(&self.sidecar_path(self.root.path())))
            .unwrap_or_default()
    }

    /// Loads only the sidecar in `dir`, without the root fallback.
    pub fn load_local(&self, dir: &ConfinedPath) -> MetadataMap {
        read_sidecar(&self.sidecar_path(dir.as_path())).unwrap_or_default()
    }

    /// Replaces the sidecar in `dir` with the serialized `map`.
    ///
    /// The content is written to a temporary file in the same directory and
    /// renamed over the sidecar, so a failed write leaves the previous file
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`CoreError::MetadataWrite`] if any step of the write fails.
    pub fn save(&self, dir: &ConfinedPath, map: &MetadataMap) -> CoreResult<()> {
        let target = self.sidecar_path(dir.as_path());
        let content = serialize(map);

        write_atomically(dir.as_path(), &target, content.as_bytes()).map_err(|source| {
            tracing::error!(path = %target.display(), error = %source, "metadata write failed");
            CoreError::MetadataWrite {
                path: target.clone(),
                source,
            }
        })?;

        tracing::debug!(path = %target.display(), entries = map.len(), "metadata saved");
        Ok(())
    }

    /// Sets or clears the description of `filename` in `dir`'s own sidecar.
    ///
    /// Runs load, modify and save while holding an exclusive lock on the
    /// directory's lock file. The inherited root sidecar is never read here.
    /// Returns `true` if the stored descriptions changed; nothing is written
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`CoreError::MetadataWrite`] if the lock cannot be taken, the existing
    /// sidecar cannot be read as UTF-8 text, or the new one cannot be written.
    /// An unreadable sidecar is never replaced.
    pub fn update(&self, dir: &ConfinedPath, filename: &str, description: &str) -> CoreResult<bool> {
        let lock_path = dir.as_path().join(self.lock_file_name());
        let _lock = SidecarLock::acquire(&lock_path).map_err(|source| {
            tracing::error!(path = %lock_path.display(), error = %source, "metadata lock failed");
            CoreError::MetadataWrite {
                path: lock_path.clone(),
                source,
            }
        })?;

        let sidecar = self.sidecar_path(dir.as_path());
        let mut map = read_sidecar_strict(&sidecar).map_err(|source| {
            tracing::error!(path = %sidecar.display(), error = %source, "existing metadata unreadable");
            CoreError::MetadataWrite {
                path: sidecar.clone(),
                source,
            }
        })?;
        if !map.set(filename, description) {
            tracing::debug!(dir = dir.relative(), filename, "description unchanged");
            return Ok(false);
        }
        self.save(dir, &map)?;

        tracing::info!(
            dir = dir.relative(),
            filename,
            cleared = description.trim().is_empty(),
            "description updated"
        );
        Ok(true)
    }
}

/// Reads and parses a sidecar. `None` when it is missing or unreadable.
fn read_sidecar(path: &Path) -> Option<MetadataMap> {
    match std::fs::read(path) {
        Ok(bytes) => Some(parse(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "sidecar unreadable");
            None
        }
    }
}

/// Reads a sidecar that is about to be rewritten.
///
/// Only a missing file counts as empty. Read errors and invalid UTF-8 are
/// returned so the caller does not overwrite content it could not load.
fn read_sidecar_strict(path: &Path) -> std::io::Result<MetadataMap> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(MetadataMap::new()),
        Err(e) => return Err(e),
    };
    let text = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(parse(&text))
}

fn write_atomically(dir: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".filelight-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(content)?;

    let permissions = std::fs::metadata(target)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.permissions())
        .or_else(default_permissions);
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }

    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}

/// Exclusive advisory lock, released when dropped.
struct SidecarLock {
    file: File,
}

impl SidecarLock {
    fn acquire(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self { file })
    }
}

impl Drop for SidecarLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "failed to release metadata lock");
        }
    }
}
