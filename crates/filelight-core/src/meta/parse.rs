//! Line grammar for the description sidecar file.
//!
//! One entry per line: a filename, a field separator, then the description.
//! Blank lines and lines starting with `#` are comments. Lines that cannot be
//! split into two fields are skipped.

use std::fmt::Write as _;

use crate::meta::map::MetadataMap;

/// Column the description starts at for short filenames.
pub const DESCRIPTION_COLUMN: usize = 30;

/// Filenames longer than this many characters are followed by a tab
/// instead of padding.
pub const TAB_THRESHOLD: usize = 28;

/// Extensions recognised by the extension-aware split, lowercase.
///
/// A filename ending in one of these may itself contain runs of spaces.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "pdf", "doc", "docx", "txt", "mp3", "mp4", "avi",
    "zip", "rar", "php", "js", "css", "html", "swf", "exe", "com", "bat", "cmd", "svg", "ico",
    "flac", "wav", "mov", "mkv", "7z", "tar", "gz", "xml", "json", "sql", "log", "md",
];

/// Parses a whole sidecar file. Later lines win over earlier ones.
pub fn parse(content: &str) -> MetadataMap {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut map = MetadataMap::new();
    for line in content.lines() {
        if let Some((name, description)) = parse_line(line) {
            map.set(&name, &description);
        }
    }
    map
}

/// Parses one line into `(filename, description)`.
///
/// Returns `None` for comments, blank lines and lines without a valid
/// two-field split.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (name, description) = split_on_extension(line, true)
        .or_else(|| split_generic(line))
        .or_else(|| split_on_extension(line, false))?;
    let (name, description) = (name.trim(), description.trim());
    if name.is_empty() || description.is_empty() {
        return None;
    }
    Some((name.to_owned(), description.to_owned()))
}

/// Splits after the leftmost known extension that is followed by whitespace.
///
/// With `written_only`, only a separator like the ones [`serialize`] writes
/// (a tab or two or more whitespace characters) counts. [`parse_line`] tries
/// that first, then the generic split, and accepts a single space after an
/// extension only as a last resort, so names such as `report.txt copy` and
/// descriptions that mention other filenames both survive a round trip.
fn split_on_extension(line: &str, written_only: bool) -> Option<(&str, &str)> {
    for (dot, _) in line.match_indices('.') {
        if dot == 0 {
            continue;
        }
        let after = &line[dot + 1..];
        // No whitespace after this dot means none after any later dot either.
        let Some(ext_len) = after.find(char::is_whitespace) else {
            break;
        };
        if !is_known_extension(&after[..ext_len]) {
            continue;
        }

        let name_end = dot + 1 + ext_len;
        let rest = &line[name_end..];
        let description = rest.trim_start();
        if description.is_empty() {
            continue;
        }
        let separator = &rest[..rest.len() - description.len()];
        if !written_only || is_written_separator(separator) {
            return Some((&line[..name_end], description));
        }
    }
    None
}

/// Splits on the first whitespace run that contains a tab or is at least
/// two characters long.
fn split_generic(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !c.is_whitespace() {
            continue;
        }
        let mut end = start + c.len_utf8();
        let mut len = 1;
        let mut has_tab = c == '\t';
        while let Some(&(i, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            end = i + next.len_utf8();
            len += 1;
            has_tab |= next == '\t';
            chars.next();
        }
        if len >= 2 || has_tab {
            return Some((&line[..start], &line[end..]));
        }
    }
    None
}

fn is_written_separator(separator: &str) -> bool {
    separator.contains('\t') || separator.chars().count() >= 2
}

fn is_known_extension(ext: &str) -> bool {
    KNOWN_EXTENSIONS.iter().any(|k| k.eq_ignore_ascii_case(ext))
}

/// Serializes a map into sidecar text, one newline-terminated line per entry.
pub fn serialize(map: &MetadataMap) -> String {
    let mut out = String::new();
    for (name, description) in map.iter() {
        if description.is_empty() {
            continue;
        }
        if name.chars().count() > TAB_THRESHOLD {
            let _ = writeln!(out, "{name}\t{description}");
        } else {
            let _ = writeln!(out, "{name:<width$}{description}", width = DESCRIPTION_COLUMN);
        }
    }
    out
}
