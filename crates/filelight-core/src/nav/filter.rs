//! Sorting and filtering for file entries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fs::entry::FileEntry;
use crate::nav::natural::natural_cmp;

/// The field by which entries are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Natural, case-insensitive name order.
    #[default]
    Name,
    /// Last-modified time.
    Date,
    /// File size in bytes.
    Size,
    /// Classified type label (case-insensitive).
    Type,
    /// Sidecar description (case-insensitive, missing sorts as empty).
    Description,
}

/// Sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest / earliest / A–Z first.
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    /// Largest / latest / Z–A first.
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

/// A comparator over two entries.
pub type EntryComparator = fn(&FileEntry, &FileEntry) -> Ordering;

impl SortField {
    /// Parses a query value. Unknown values fall back to [`SortField::Name`].
    pub fn from_query(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "date" => SortField::Date,
            "size" => SortField::Size,
            "type" => SortField::Type,
            "description" => SortField::Description,
            _ => SortField::Name,
        }
    }

    /// The query value for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Date => "date",
            SortField::Size => "size",
            SortField::Type => "type",
            SortField::Description => "description",
        }
    }

    /// The comparator used within the directory and file groups.
    pub fn comparator(self) -> EntryComparator {
        match self {
            SortField::Name => by_name,
            SortField::Date => by_date,
            SortField::Size => by_size,
            SortField::Type => by_type,
            SortField::Description => by_description,
        }
    }
}

impl SortDirection {
    /// Parses a query value. Only `desc`/`descending` select descending order.
    pub fn from_query(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    /// The query value for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

fn by_name(a: &FileEntry, b: &FileEntry) -> Ordering {
    natural_cmp(a.name(), b.name())
}

fn by_date(a: &FileEntry, b: &FileEntry) -> Ordering {
    a.modified().cmp(&b.modified())
}

fn by_size(a: &FileEntry, b: &FileEntry) -> Ordering {
    a.size().cmp(&b.size())
}

fn by_type(a: &FileEntry, b: &FileEntry) -> Ordering {
    caseless_cmp(a.type_label(), b.type_label())
}

fn by_description(a: &FileEntry, b: &FileEntry) -> Ordering {
    caseless_cmp(
        a.description().unwrap_or_default(),
        b.description().unwrap_or_default(),
    )
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Puts directories before files, then defers to `secondary`.
pub fn dirs_first<F>(secondary: F) -> impl Fn(&FileEntry, &FileEntry) -> Ordering
where
    F: Fn(&FileEntry, &FileEntry) -> Ordering,
{
    move |a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| secondary(a, b))
}

/// Sorts a list of file entries by the given field and direction.
///
/// Directories always appear before files; `direction` only reverses the
/// order inside each group. The sort is stable, so entries with equal keys
/// keep their input order. Returns a **new** sorted `Vec<FileEntry>`; the
/// input slice is never mutated.
pub fn sort_entries(
    entries: &[FileEntry],
    field: SortField,
    direction: SortDirection,
) -> Vec<FileEntry> {
    let mut sorted: Vec<FileEntry> = entries.to_vec();
    let by_field = field.comparator();
    sorted.sort_by(dirs_first(|a, b| direction.apply(by_field(a, b))));
    sorted
}

/// Drops entries whose name is in `hidden` (exact, case-sensitive match).
pub fn filter_hidden_names<S: AsRef<str>>(entries: &[FileEntry], hidden: &[S]) -> Vec<FileEntry> {
    entries
        .iter()
        .filter(|e| !hidden.iter().any(|h| h.as_ref() == e.name()))
        .cloned()
        .collect()
}

/// Keeps entries whose name or description contains `query`, ignoring case.
///
/// An empty query keeps everything.
pub fn filter_by_query(entries: &[FileEntry], query: &str) -> Vec<FileEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            e.name().to_lowercase().contains(&needle)
                || e
                    .description()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
