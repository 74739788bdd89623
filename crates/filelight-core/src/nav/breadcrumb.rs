//! Breadcrumb trail for a root-relative directory.

use serde::Serialize;

/// One step of the trail: a path segment and the cumulative path up to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// Builds the trail for `relative`, e.g. `a/b` → `[a → a, b → a/b]`.
///
/// Empty segments are skipped, so the root yields an empty trail.
pub fn build_breadcrumb(relative: &str) -> Vec<Crumb> {
    let mut path = String::new();
    relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(segment);
            Crumb {
                name: segment.to_string(),
                path: path.clone(),
            }
        })
        .collect()
}
