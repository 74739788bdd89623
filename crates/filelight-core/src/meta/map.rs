//! Ordered filename → description map.

/// Descriptions for the entries of one directory.
///
/// Keys keep the order in which they were first inserted; replacing a value
/// keeps the key's position and new keys are appended. That order is the
/// order the sidecar file is written in.
///
/// Every stored description is non-empty: [`set`](Self::set) with an empty
/// description removes the key instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMap {
    entries: Vec<(String, String)>,
}

impl MetadataMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the description for `filename`.
    ///
    /// Surrounding whitespace is trimmed and line breaks become spaces, so a
    /// description always fits on one sidecar line. An empty result removes
    /// the key. Returns `true` if the map changed.
    pub fn set(&mut self, filename: &str, description: &str) -> bool {
        let description = description.trim().replace(['\r', '\n'], " ");
        let description = description.as_str();
        if description.is_empty() {
            return self.remove(filename).is_some();
        }
        match self.entries.iter_mut().find(|(k, _)| k == filename) {
            Some((_, value)) if *value == description => false,
            Some((_, value)) => {
                *value = description.to_owned();
                true
            }
            None => {
                self.entries
                    .push((filename.to_owned(), description.to_owned()));
                true
            }
        }
    }

    /// Removes `filename`, returning its description if it was present.
    pub fn remove(&mut self, filename: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == filename)?;
        Some(self.entries.remove(idx).1)
    }

    /// Looks up the description for `filename`.
    #[must_use]
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == filename)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `filename` has a description.
    #[must_use]
    pub fn contains(&self, filename: &str) -> bool {
        self.get(filename).is_some()
    }

    /// Iterates in write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of described entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k.as_ref(), v.as_ref());
        }
        map
    }
}
