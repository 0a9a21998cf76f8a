//! Registry index - the flat listing of every path in the registry
//!
//! The index is loaded once per session from the registry's
//! recursive tree listing and treated as read-only afterwards.

use serde::Deserialize;

use super::RegistryError;

/// One row of the remote registry listing
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    /// Slash-separated path of a file or directory, relative to the
    /// registry root. Unique within one snapshot.
    pub path: String,
}

/// The full in-memory registry snapshot, in provider order
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    entries: Vec<RegistryEntry>,
}

impl RegistryIndex {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a component name to its registry path.
    ///
    /// Returns the path of the first entry whose path string ends
    /// with `name`. The match is a raw string suffix, not
    /// segment-aware, so callers may pass either a leaf name
    /// (`"card"`) or a qualified partial path (`"global/css/card"`).
    /// The flip side is that a name which is a suffix of another
    /// component's path (`"banner"` vs `"hero-banner"`) resolves to
    /// whichever entry comes first in the listing.
    pub fn resolve(&self, name: &str) -> Result<&str, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::ComponentNotFound {
                name: name.to_string(),
            });
        }

        self.entries
            .iter()
            .find(|entry| entry.path.ends_with(name))
            .map(|entry| entry.path.as_str())
            .ok_or_else(|| RegistryError::ComponentNotFound {
                name: name.to_string(),
            })
    }

    /// Entries whose path contains the query (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&RegistryEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.path.to_lowercase().contains(&query_lower))
            .collect()
    }
}
