use chrono::{DateTime, Utc};
use filelight_core::{entry_link, format_size, Crumb, FileEntry, Listing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct FileEntryDto {
    pub name: String,
    /// Root-relative path of the entry.
    pub path: String,
    /// Percent-encoded root-relative link for downloads.
    pub link: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub size_display: String,
    pub modified: Option<String>,
    pub type_label: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: Option<String>,
}

impl FileEntryDto {
    pub fn from_entry(entry: &FileEntry, relative_dir: &str) -> Self {
        let path = if relative_dir.is_empty() {
            entry.name().to_string()
        } else {
            format!("{relative_dir}/{}", entry.name())
        };
        let size_display = if entry.is_dir() {
            String::new()
        } else {
            format_size(entry.size())
        };

        Self {
            name: entry.name().to_string(),
            path,
            link: entry_link(relative_dir, entry.name()),
            is_dir: entry.is_dir(),
            is_symlink: entry.is_symlink(),
            size: entry.size(),
            size_display,
            modified: entry
                .modified()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339()),
            type_label: entry.type_label().to_string(),
            icon: entry.kind().icon,
            color: entry.kind().color,
            description: entry.description().map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub current_dir: String,
    pub breadcrumb: Vec<Crumb>,
    pub sort: &'static str,
    pub order: &'static str,
    pub query: String,
    pub entries: Vec<FileEntryDto>,
}

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        let relative = listing.directory.relative();
        Self {
            current_dir: relative.to_string(),
            breadcrumb: listing.breadcrumb.clone(),
            sort: listing.query.sort.as_str(),
            order: listing.query.direction.as_str(),
            query: listing.query.query.clone(),
            entries: listing
                .entries
                .iter()
                .map(|e| FileEntryDto::from_entry(e, relative))
                .collect(),
        }
    }
}
