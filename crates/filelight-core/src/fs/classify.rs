//! Extension-based classification: type label, icon and colour.
//!
//! The same label drives the `type` sort column, so the table is the single
//! source of truth for both display and ordering.

use serde::Serialize;

/// Icon identifier used for directories.
pub const FOLDER_ICON: &str = "folder";
/// Colour used for directories.
pub const FOLDER_COLOR: &str = "#5DADE2";
/// Icon identifier used for files with no table entry.
pub const GENERIC_ICON: &str = "file-earmark";
/// Colour used for files with no table entry.
pub const GENERIC_COLOR: &str = "#7F8C8D";
/// Type label of every directory.
pub const DIR_LABEL: &str = "Dir";

/// One row of the static classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationEntry {
    pub extension: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

const fn row(
    extension: &'static str,
    label: &'static str,
    icon: &'static str,
    color: &'static str,
) -> ClassificationEntry {
    ClassificationEntry {
        extension,
        label,
        icon,
        color,
    }
}

/// Known extensions, lowercase.
pub const CLASSIFICATIONS: &[ClassificationEntry] = &[
    row("pdf", "PDF", "file-earmark-pdf", "#E74C3C"),
    row("doc", "Document", "file-earmark-word", "#2E86C1"),
    row("docx", "Document", "file-earmark-word", "#2E86C1"),
    row("xls", "Spreadsheet", "file-earmark-excel", "#27AE60"),
    row("xlsx", "Spreadsheet", "file-earmark-excel", "#27AE60"),
    row("ppt", "Presentation", "file-earmark-ppt", "#E67E22"),
    row("pptx", "Presentation", "file-earmark-ppt", "#E67E22"),
    row("txt", "Text", "file-earmark-text", "#95A5A6"),
    row("md", "Text", "file-earmark-text", "#95A5A6"),
    row("jpg", "Image", "file-earmark-image", "#E74C3C"),
    row("jpeg", "Image", "file-earmark-image", "#E74C3C"),
    row("png", "Image", "file-earmark-image", "#E74C3C"),
    row("gif", "Image", "file-earmark-image", "#E74C3C"),
    row("webp", "Image", "file-earmark-image", "#E74C3C"),
    row("mp3", "Music", "file-earmark-music", "#9B59B6"),
    row("wav", "Music", "file-earmark-music", "#9B59B6"),
    row("flac", "Music", "file-earmark-music", "#9B59B6"),
    row("aac", "Music", "file-earmark-music", "#9B59B6"),
    row("mp4", "Video", "file-earmark-play", "#F39C12"),
    row("avi", "Video", "file-earmark-play", "#F39C12"),
    row("mkv", "Video", "file-earmark-play", "#F39C12"),
    row("mov", "Video", "file-earmark-play", "#F39C12"),
    row("zip", "Archive", "file-earmark-zip", "#34495E"),
    row("rar", "Archive", "file-earmark-zip", "#34495E"),
    row("7z", "Archive", "file-earmark-zip", "#34495E"),
    row("tar", "Archive", "file-earmark-zip", "#34495E"),
    row("js", "Code", "file-earmark-code", "#F1C40F"),
    row("css", "Code", "file-earmark-code", "#3498DB"),
    row("html", "Code", "file-earmark-code", "#E67E22"),
    row("php", "Code", "file-earmark-code", "#8E44AD"),
    row("py", "Code", "file-earmark-code", "#3498DB"),
];

/// The result of classifying an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: String,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Classification {
    /// The fixed classification of every directory.
    pub fn directory() -> Self {
        Self {
            label: DIR_LABEL.to_string(),
            icon: FOLDER_ICON,
            color: FOLDER_COLOR,
        }
    }
}

/// Classifies an entry by name.
///
/// Directories are always `Dir` regardless of their name.
pub fn classify(name: &str, is_dir: bool) -> Classification {
    if is_dir {
        return Classification::directory();
    }

    let ext = extension_lower(name);
    match lookup(&ext) {
        Some(entry) => Classification {
            label: entry.label.to_string(),
            icon: entry.icon,
            color: entry.color,
        },
        None => Classification {
            label: ext.to_uppercase(),
            icon: GENERIC_ICON,
            color: GENERIC_COLOR,
        },
    }
}

/// Looks up a lowercase extension in [`CLASSIFICATIONS`].
pub fn lookup(ext: &str) -> Option<&'static ClassificationEntry> {
    if ext.is_empty() {
        return None;
    }
    CLASSIFICATIONS.iter().find(|e| e.extension == ext)
}

/// Text after the last `.`, lowercased. Empty when there is no dot or the
/// name ends with one. A leading dot counts, so `.htaccess` yields
/// `htaccess`.
pub fn extension_lower(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_ignores_name() {
        let c = classify("photos.zip", true);
        assert_eq!(c, Classification::directory());
        assert_eq!(c.label, "Dir");
        assert_eq!(c.icon, "folder");
    }

    #[test]
    fn known_extension() {
        let c = classify("report.pdf", false);
        assert_eq!(c.label, "PDF");
        assert_eq!(c.icon, "file-earmark-pdf");
        assert_eq!(c.color, "#E74C3C");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(classify("Holiday.JPEG", false).label, "Image");
        assert_eq!(classify("song.Mp3", false).label, "Music");
    }

    #[test]
    fn code_colours_differ_per_language() {
        assert_eq!(classify("app.js", false).color, "#F1C40F");
        assert_eq!(classify("site.css", false).color, "#3498DB");
        assert_eq!(classify("index.php", false).color, "#8E44AD");
        assert_eq!(classify("main.py", false).label, "Code");
    }

    #[test]
    fn unknown_extension_is_uppercased() {
        let c = classify("data.parquet", false);
        assert_eq!(c.label, "PARQUET");
        assert_eq!(c.icon, GENERIC_ICON);
        assert_eq!(c.color, GENERIC_COLOR);
    }

    #[test]
    fn no_extension_has_empty_label() {
        let c = classify("Makefile", false);
        assert_eq!(c.label, "");
        assert_eq!(c.icon, GENERIC_ICON);
    }

    #[test]
    fn trailing_dot_has_empty_label() {
        assert_eq!(classify("archive.", false).label, "");
    }

    #[test]
    fn only_last_extension_counts() {
        assert_eq!(classify("backup.tar.gz", false).label, "GZ");
        assert_eq!(classify("backup.gz.tar", false).label, "Archive");
    }

    #[test]
    fn dotfile_uses_name_as_extension() {
        assert_eq!(extension_lower(".htaccess"), "htaccess");
        assert_eq!(classify(".htaccess", false).label, "HTACCESS");
    }

    #[test]
    fn table_extensions_are_lowercase_and_unique() {
        for (i, entry) in CLASSIFICATIONS.iter().enumerate() {
            assert_eq!(entry.extension, entry.extension.to_lowercase());
            assert!(
                !CLASSIFICATIONS[i + 1..]
                    .iter()
                    .any(|other| other.extension == entry.extension),
                "duplicate extension {}",
                entry.extension
            );
        }
    }

    #[test]
    fn lookup_empty_is_none() {
        assert!(lookup("").is_none());
    }
}
