#![deny(unsafe_code)]

//! `registry.yaml` parsing.
//!
//! ```yaml
//! registry:
//!   - id: school_boards
//!     title: Ontario School Boards
//!     path: data/school_boards.yaml
//!     version: 1.0
//!     source: { name: Ontario Data Catalogue, url: https://data.ontario.ca }
//!     tags: [education, reference]
//! ```
//!
//! Every key is optional. Scalars are accepted in any YAML form and kept as
//! their string rendering, so `version: 1.0` and `version: "1.0"` both work.

use std::path::Path;

use registry_model::{SourceAttribution, Standard, value_text};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{RegistryError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "entry_list")]
    pub registry: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    #[serde(deserialize_with = "scalar_string")]
    pub path: String,
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(deserialize_with = "scalar_string")]
    pub maintainer: String,
    #[serde(deserialize_with = "scalar_string")]
    pub last_updated: String,
    pub source: Option<ManifestSource>,
    #[serde(deserialize_with = "scalar_list")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifestSource {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub url: String,
}

impl From<ManifestEntry> for Standard {
    fn from(entry: ManifestEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            description: entry.description,
            path: entry.path,
            version: entry.version,
            maintainer: entry.maintainer,
            last_updated: entry.last_updated,
            source: entry.source.map(|source| SourceAttribution {
                name: source.name,
                url: source.url,
            }),
            tags: entry.tags,
        }
    }
}

/// Read and parse a manifest file.
///
/// A missing file, an empty file, or a document without entries all produce
/// an empty manifest. Malformed YAML is an error.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no manifest file, registry is empty");
        return Ok(Manifest::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    parse_manifest(&contents).map_err(|source| RegistryError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse manifest YAML text.
pub fn parse_manifest(contents: &str) -> std::result::Result<Manifest, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(Manifest::default());
    }
    let manifest: Option<Manifest> = serde_yaml::from_str(contents)?;
    Ok(manifest.unwrap_or_default())
}

fn entry_list<'de, D>(deserializer: D) -> std::result::Result<Vec<ManifestEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ManifestEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value).into_owned())
}

fn scalar_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| value_text(item).into_owned())
            .collect(),
        other => vec![value_text(&other).into_owned()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_default_to_empty() {
        let manifest = parse_manifest("registry:\n  - id: a\n").expect("parse");
        let standard = Standard::from(manifest.registry[0].clone());
        assert_eq!(standard.id, "a");
        assert_eq!(standard.title, "");
        assert!(standard.source.is_none());
        assert!(standard.tags.is_empty());
    }

    #[test]
    fn numeric_scalars_become_strings() {
        let manifest =
            parse_manifest("registry:\n  - id: 42\n    version: 1.0\n    last_updated: 2025-10-30\n")
                .expect("parse");
        let entry = &manifest.registry[0];
        assert_eq!(entry.id, "42");
        assert_eq!(entry.version, "1.0");
        assert_eq!(entry.last_updated, "2025-10-30");
    }

    #[test]
    fn null_values_are_empty() {
        let manifest =
            parse_manifest("registry:\n  - id: a\n    title: ~\n    tags: ~\n    source: ~\n")
                .expect("parse");
        let entry = &manifest.registry[0];
        assert_eq!(entry.title, "");
        assert!(entry.tags.is_empty());
        assert!(entry.source.is_none());
    }

    #[test]
    fn partial_source_defaults_missing_fields() {
        let manifest =
            parse_manifest("registry:\n  - id: a\n    source:\n      name: Catalogue\n")
                .expect("parse");
        let source = manifest.registry[0].source.clone().expect("source");
        assert_eq!(source.name, "Catalogue");
        assert_eq!(source.url, "");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let manifest = parse_manifest("owner: ops\nregistry:\n  - id: a\n    colour: blue\n")
            .expect("parse");
        assert_eq!(manifest.registry.len(), 1);
    }

    #[test]
    fn empty_documents_have_no_entries() {
        for text in ["", "   \n", "registry:\n", "registry: ~\n", "other: 1\n"] {
            let manifest = parse_manifest(text).expect("parse");
            assert!(manifest.registry.is_empty(), "{text:?}");
        }
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_manifest("registry: [unclosed").is_err());
        assert!(parse_manifest("registry:\n  - just a string\n").is_err());
    }
}
