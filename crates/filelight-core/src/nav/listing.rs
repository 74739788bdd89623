//! The listing pipeline: scan, hide, attach descriptions, search, sort.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::fs::confine::ConfinedPath;
use crate::fs::entry::FileEntry;
use crate::fs::ops::read_directory;
use crate::meta::map::MetadataMap;
use crate::nav::filter::{
    filter_by_query, filter_hidden_names, sort_entries, SortDirection, SortField,
};

/// Search and sort parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring matched against names and descriptions.
    #[serde(default)]
    pub query: String,
    /// Field the entries are ordered by.
    #[serde(default)]
    pub sort: SortField,
    /// Order inside the directory and file groups.
    #[serde(default)]
    pub direction: SortDirection,
}

impl ListQuery {
    /// Builds a query from raw request values, applying the fallbacks for
    /// missing or unknown sort and order values.
    pub fn from_params(query: Option<&str>, sort: Option<&str>, order: Option<&str>) -> Self {
        Self {
            query: query.unwrap_or_default().to_string(),
            sort: sort.map(SortField::from_query).unwrap_or_default(),
            direction: order.map(SortDirection::from_query).unwrap_or_default(),
        }
    }
}

/// Lists `dir` for display.
///
/// Hidden names are removed first, descriptions from `metadata` are attached,
/// the search query is applied to names and descriptions, and the result is
/// sorted with directories first.
///
/// # Errors
///
/// Propagates the errors of [`read_directory`].
pub fn list_directory<S: AsRef<str>>(
    dir: &ConfinedPath,
    hidden_names: &[S],
    query: &ListQuery,
    metadata: &MetadataMap,
) -> CoreResult<Vec<FileEntry>> {
    let scanned = read_directory(dir.as_path())?;
    let visible: Vec<FileEntry> = filter_hidden_names(&scanned, hidden_names)
        .into_iter()
        .map(|e| {
            let description = metadata.get(e.name());
            e.with_description(description)
        })
        .collect();
    let matched = filter_by_query(&visible, &query.query);
    let sorted = sort_entries(&matched, query.sort, query.direction);

    tracing::debug!(
        dir = dir.relative(),
        scanned = scanned.len(),
        listed = sorted.len(),
        sort = query.sort.as_str(),
        order = query.direction.as_str(),
        "directory listed"
    );
    Ok(sorted)
}
