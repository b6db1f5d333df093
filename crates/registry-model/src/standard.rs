use serde::{Deserialize, Serialize};

/// Attribution for the upstream publisher of a standard's data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttribution {
    pub name: String,
    pub url: String,
}

/// A registry entry describing one dataset and its metadata.
///
/// Descriptors are built once from the manifest and never change afterwards.
/// A blank `id` is kept in listings but can never be looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Path hint, relative to the registry root, used to seed data file resolution.
    pub path: String,
    pub version: String,
    pub maintainer: String,
    pub last_updated: String,
    pub source: Option<SourceAttribution>,
    pub tags: Vec<String>,
}

impl Standard {
    /// Returns true if the id is usable as a lookup key.
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Returns true if the standard carries a data path hint.
    pub fn has_path(&self) -> bool {
        !self.path.trim().is_empty()
    }
}
