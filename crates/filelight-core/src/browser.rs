//! Request-level operations: browsing a directory and editing a description.
//!
//! [`Browser`] ties root confinement, the sidecar store and the listing
//! pipeline together. It performs no authentication; callers prove they may
//! edit by passing an [`AdminContext`].

use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::error::{CoreError, CoreResult};
use crate::fs::confine::{ConfinedPath, ConfinedRoot};
use crate::fs::entry::FileEntry;
use crate::meta::store::MetadataStore;
use crate::nav::breadcrumb::{build_breadcrumb, Crumb};
use crate::nav::filter::{SortDirection, SortField};
use crate::nav::listing::{list_directory, ListQuery};

/// Error message when the target directory fails confinement.
pub const INVALID_DIRECTORY: &str = "Invalid directory";
/// Error message when the sidecar cannot be written.
pub const WRITE_FAILED: &str = "Could not write metadata";
/// Error message when the filename cannot be stored in a sidecar.
pub const INVALID_FILENAME: &str = "Invalid filename";

/// Raw parameters of a browse request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrowseRequest {
    /// Root-relative directory; empty means the root.
    #[serde(default)]
    pub dir: String,
    /// Search text; `None` lists everything.
    #[serde(default)]
    pub q: Option<String>,
    /// Sort field name; `None` uses the configured default.
    #[serde(default)]
    pub sort: Option<String>,
    /// `asc` or `desc`; `None` uses the configured default.
    #[serde(default)]
    pub order: Option<String>,
}

/// The result of a successful browse.
#[derive(Debug, Clone)]
pub struct Listing {
    /// The confined directory that was listed.
    pub directory: ConfinedPath,
    /// Trail from the root to `directory`; empty at the root.
    pub breadcrumb: Vec<Crumb>,
    /// Search and sort actually applied, after defaults and fallbacks.
    pub query: ListQuery,
    /// Visible entries, filtered and sorted.
    pub entries: Vec<FileEntry>,
}

/// A request to set or clear one description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateRequest {
    /// Root-relative directory holding the file.
    #[serde(default)]
    pub dir: String,
    /// Bare file name used as the sidecar key.
    pub filename: String,
    /// New description; empty clears it.
    #[serde(default)]
    pub description: String,
}

/// Outcome of [`Browser::update_description`], shaped for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// An authorization decision made by the caller.
///
/// The core never checks credentials; whoever builds an `AdminContext`
/// vouches that `principal` may edit descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    principal: String,
}

impl AdminContext {
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }

    /// Who the caller authorized.
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

/// Browsing and description editing below one confined root.
#[derive(Debug, Clone)]
pub struct Browser {
    root: ConfinedRoot,
    store: MetadataStore,
    hidden_names: Vec<String>,
    default_sort: SortField,
    default_order: SortDirection,
}

impl Browser {
    /// Canonicalizes the configured root and prepares the store.
    ///
    /// # Errors
    ///
    /// Fails like [`ConfinedRoot::new`] when the root is missing or not a
    /// directory.
    pub fn new(settings: &Settings) -> CoreResult<Self> {
        let root = ConfinedRoot::new(&settings.root)?;
        let store = MetadataStore::new(root.clone()).with_file_name(settings.sidecar_name.clone());
        Ok(Self {
            root,
            store,
            hidden_names: settings.effective_hidden_names(),
            default_sort: settings.default_sort,
            default_order: settings.default_order,
        })
    }

    pub fn root(&self) -> &ConfinedRoot {
        &self.root
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn hidden_names(&self) -> &[String] {
        &self.hidden_names
    }

    /// Lists a directory.
    ///
    /// Missing `sort`/`order` use the configured defaults; unknown values
    /// fall back to name / ascending.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Forbidden`] if `dir` escapes the root or does not exist.
    /// - [`CoreError::NotADirectory`] if `dir` names a file.
    /// - Scan errors from [`list_directory`].
    pub fn browse(&self, request: &BrowseRequest) -> CoreResult<Listing> {
        let directory = self.root.confine_dir(&request.dir)?;
        let query = ListQuery {
            query: request.q.clone().unwrap_or_default(),
            sort: request
                .sort
                .as_deref()
                .map_or(self.default_sort, SortField::from_query),
            direction: request
                .order
                .as_deref()
                .map_or(self.default_order, SortDirection::from_query),
        };

        let metadata = self.store.load(&directory);
        let entries = list_directory(&directory, &self.hidden_names, &query, &metadata)?;
        let breadcrumb = build_breadcrumb(directory.relative());

        Ok(Listing {
            directory,
            breadcrumb,
            query,
            entries,
        })
    }

    /// Sets or clears a description in the directory's own sidecar.
    ///
    /// Never fails outright: problems are reported in the returned
    /// [`UpdateOutcome`] so the caller can show them next to the edit.
    pub fn update_description(&self, admin: &AdminContext, request: &UpdateRequest) -> UpdateOutcome {
        let directory = match self.root.confine_dir(&request.dir) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(principal = admin.principal(), dir = %request.dir, error = %e, "description update rejected");
                return UpdateOutcome::failed(INVALID_DIRECTORY);
            }
        };

        let filename = request.filename.trim();
        if let Err(e) = validate_filename(filename) {
            tracing::warn!(principal = admin.principal(), error = %e, "description update rejected");
            return UpdateOutcome::failed(INVALID_FILENAME);
        }

        match self.store.update(&directory, filename, &request.description) {
            Ok(changed) => {
                tracing::info!(
                    principal = admin.principal(),
                    dir = directory.relative(),
                    filename,
                    changed,
                    "description saved"
                );
                UpdateOutcome::ok()
            }
            Err(e) => {
                tracing::error!(principal = admin.principal(), error = %e, "description update failed");
                UpdateOutcome::failed(WRITE_FAILED)
            }
        }
    }

    /// Confines `relative` to a regular file, for downloads.
    ///
    /// Hidden control files are reported as missing.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Forbidden`] if the path escapes the root.
    /// - [`CoreError::NotFound`] if it is a directory or a hidden name.
    pub fn resolve_file(&self, relative: &str) -> CoreResult<ConfinedPath> {
        let file = self.root.confine_file(relative)?;
        let name = file
            .as_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.hidden_names.contains(&name) {
            return Err(CoreError::NotFound(file.as_path().to_path_buf()));
        }
        Ok(file)
    }
}

/// A sidecar key must be a single, non-empty path component on one line.
fn validate_filename(name: &str) -> CoreResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with('#')
        || name.contains(['/', '\\', '\n', '\r', '\0']);
    if invalid {
        return Err(CoreError::InvalidName(name.to_string()));
    }
    Ok(())
}
