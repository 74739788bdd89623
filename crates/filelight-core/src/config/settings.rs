//! Browsing configuration loaded from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) gives a
//! working setup rooted at the current directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::meta::store::SIDECAR_FILE_NAME;
use crate::nav::filter::{SortDirection, SortField};

/// Browsing settings shared by every frontend.
///
/// Call [`Settings::load`] to read from a TOML path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory that confines every browse and write.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Name of the per-directory description sidecar.
    #[serde(default = "default_sidecar_name")]
    pub sidecar_name: String,
    /// Entry names that never appear in listings. The sidecar and its lock
    /// file are always hidden in addition to these.
    #[serde(default = "default_hidden_names")]
    pub hidden_names: Vec<String>,
    /// Sort field used when a request does not name one.
    #[serde(default)]
    pub default_sort: SortField,
    /// Sort order used when a request does not name one.
    #[serde(default)]
    pub default_order: SortDirection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: default_root(),
            sidecar_name: default_sidecar_name(),
            hidden_names: default_hidden_names(),
            default_sort: SortField::default(),
            default_order: SortDirection::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        Self::from_toml(&content)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// The configured hidden names plus the sidecar and its lock file.
    pub fn effective_hidden_names(&self) -> Vec<String> {
        let mut names = self.hidden_names.clone();
        for control in [self.sidecar_name.clone(), format!(".{}.lock", self.sidecar_name)] {
            if !names.contains(&control) {
                names.push(control);
            }
        }
        names
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_sidecar_name() -> String {
    SIDECAR_FILE_NAME.to_string()
}

fn default_hidden_names() -> Vec<String> {
    [".htaccess", "filelight.toml", "_h5ai"]
        .into_iter()
        .map(String::from)
        .collect()
}
