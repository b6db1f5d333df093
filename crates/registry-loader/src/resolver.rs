#![deny(unsafe_code)]

//! Data file resolution.
//!
//! Two policies exist side by side and must stay distinct:
//!
//! - record-gated ids check a fixed list of files and skip any file that
//!   yields no records, so sibling exports can shadow each other;
//! - every other id takes the first candidate that exists on disk, even if it
//!   turns out to be empty.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use registry_model::{Standard, normalize_records};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{ResolutionRule, ResolverConfig};
use crate::error::{RegistryError, Result};

/// Resolves standards to parsed data documents under a registry root.
#[derive(Debug, Clone, Copy)]
pub struct DataResolver<'a> {
    root: &'a Path,
    config: &'a ResolverConfig,
}

impl<'a> DataResolver<'a> {
    pub fn new(root: &'a Path, config: &'a ResolverConfig) -> Self {
        Self { root, config }
    }

    /// Locate and parse the data document for `standard`.
    ///
    /// Returns `Ok(None)` when no candidate applies or the chosen file holds
    /// no records.
    ///
    /// # Errors
    ///
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn resolve(&self, standard: &Standard) -> Result<Option<Value>> {
        match self.config.rule_for(&standard.id) {
            ResolutionRule::RecordGated(candidates) => self.resolve_record_gated(candidates),
            ResolutionRule::ExistenceGated => self.resolve_existence_gated(standard),
        }
    }

    fn resolve_record_gated(&self, candidates: &[PathBuf]) -> Result<Option<Value>> {
        for candidate in candidates {
            let path = self.root.join(candidate);
            if !path.is_file() {
                trace!(path = %path.display(), "candidate missing");
                continue;
            }
            let document = read_document(&path)?;
            if normalize_records(&document).is_empty() {
                trace!(path = %path.display(), "candidate has no records");
                continue;
            }
            debug!(path = %path.display(), "resolved record-gated data file");
            return Ok(Some(document));
        }
        Ok(None)
    }

    fn resolve_existence_gated(&self, standard: &Standard) -> Result<Option<Value>> {
        let candidates = self.candidates(standard);
        let Some(path) = candidates.into_iter().find(|path| {
            let found = path.is_file();
            if !found {
                trace!(path = %path.display(), "candidate missing");
            }
            found
        }) else {
            debug!(id = %standard.id, "no data file found");
            return Ok(None);
        };

        let document = read_document(&path)?;
        if normalize_records(&document).is_empty() {
            debug!(path = %path.display(), "data file has no records");
            return Ok(None);
        }
        debug!(path = %path.display(), "resolved data file");
        Ok(Some(document))
    }

    /// Existence-gated candidates for a standard's path hint, in priority
    /// order: the path itself, the date-stamped file name, then the JSON
    /// sibling of a YAML file.
    pub fn candidates(&self, standard: &Standard) -> Vec<PathBuf> {
        if !standard.has_path() {
            return Vec::new();
        }
        let primary = self.root.join(&standard.path);
        let mut candidates = vec![primary.clone()];
        if let Some(name) = primary.file_name().and_then(OsStr::to_str) {
            candidates.push(
                primary.with_file_name(format!("{}{name}", self.config.date_stamp_prefix)),
            );
        }
        if is_yaml(&primary) {
            candidates.push(primary.with_extension("json"));
        }
        candidates.dedup();
        candidates
    }
}

/// Returns true for `.yaml` and `.yml` files.
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Read a data file, parsing YAML or JSON by extension.
///
/// Whitespace-only files parse to `Value::Null`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn read_document(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    if is_yaml(path) {
        serde_yaml::from_str(&contents).map_err(|e| RegistryError::data_parse(path, e))
    } else {
        serde_json::from_str(&contents).map_err(|e| RegistryError::data_parse(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_path(path: &str) -> Standard {
        Standard {
            id: "codes".into(),
            path: path.into(),
            ..Standard::default()
        }
    }

    #[test]
    fn candidates_follow_priority_order() {
        let config = ResolverConfig::default();
        let resolver = DataResolver::new(Path::new("/reg"), &config);
        assert_eq!(
            resolver.candidates(&with_path("data/codes.yaml")),
            vec![
                PathBuf::from("/reg/data/codes.yaml"),
                PathBuf::from("/reg/data/20251030_codes.yaml"),
                PathBuf::from("/reg/data/codes.json"),
            ]
        );
    }

    #[test]
    fn json_hint_has_no_extension_swap() {
        let config = ResolverConfig::default();
        let resolver = DataResolver::new(Path::new("/reg"), &config);
        assert_eq!(
            resolver.candidates(&with_path("codes.json")),
            vec![
                PathBuf::from("/reg/codes.json"),
                PathBuf::from("/reg/20251030_codes.json"),
            ]
        );
    }

    #[test]
    fn blank_hint_has_no_candidates() {
        let config = ResolverConfig::default();
        let resolver = DataResolver::new(Path::new("/reg"), &config);
        assert!(resolver.candidates(&with_path("  ")).is_empty());
    }

    #[test]
    fn yaml_detection_is_extension_based() {
        assert!(is_yaml(Path::new("a/b.yaml")));
        assert!(is_yaml(Path::new("a/b.YML")));
        assert!(!is_yaml(Path::new("a/b.json")));
        assert!(!is_yaml(Path::new("a/yaml")));
    }
}
