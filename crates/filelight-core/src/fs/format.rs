//! Human-readable formatting helpers for listings.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Formats a byte count with binary thresholds and one decimal place.
///
/// ```
/// use filelight_core::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(2048), "2.0 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// Builds a link path for `name` inside `relative_dir`.
///
/// Each segment is percent-encoded on its own (RFC 3986 unreserved bytes
/// are kept) and the segments are joined with `/`.
pub fn entry_link(relative_dir: &str, name: &str) -> String {
    relative_dir
        .split('/')
        .filter(|s| !s.is_empty())
        .chain(std::iter::once(name))
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_one_kilobyte() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn kilobytes() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn megabytes() {
        assert_eq!(format_size(5_242_880), "5.0 MB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
    }

    #[test]
    fn gigabytes() {
        assert_eq!(format_size(2_147_483_648), "2.0 GB");
        assert_eq!(format_size(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn link_at_root() {
        assert_eq!(entry_link("", "a file.txt"), "a%20file.txt");
    }

    #[test]
    fn link_in_subdirectory_encodes_each_segment() {
        assert_eq!(
            entry_link("my docs/2024", "r&d #1.pdf"),
            "my%20docs/2024/r%26d%20%231.pdf"
        );
    }

    #[test]
    fn link_encodes_utf8_bytes() {
        assert_eq!(entry_link("", "é.txt"), "%C3%A9.txt");
    }
}
