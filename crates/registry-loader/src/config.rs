//! Registry root resolution and loader configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable for overriding the registry root directory.
pub const REGISTRY_ENV_VAR: &str = "STANDARDS_REGISTRY_DIR";

/// Manifest file name, relative to the registry root.
pub const MANIFEST_FILE_NAME: &str = "registry.yaml";

/// Token prepended to data file names by the dated export convention.
pub const DATE_STAMP_PREFIX: &str = "20251030_";

/// Standard id whose data is spread over sibling files that shadow each other.
pub const SCHOOL_BOARDS_ID: &str = "school_boards";

/// Get the registry root directory.
///
/// Resolution order:
/// 1. `explicit`, when given (the `--registry` flag)
/// 2. `STANDARDS_REGISTRY_DIR` environment variable
/// 3. the current working directory
pub fn registry_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(root) = std::env::var(REGISTRY_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(".")
}

/// How a standard id is mapped to a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule<'a> {
    /// Fixed files, relative to the registry root, checked in order. A file
    /// only wins if it exists and yields at least one record.
    RecordGated(&'a [PathBuf]),
    /// Candidates derived from the manifest path. The first file that exists
    /// wins, whatever it contains.
    ExistenceGated,
}

/// Data file resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Prefix for the dated-filename candidate.
    pub date_stamp_prefix: String,
    /// Record-gated overrides by standard id.
    pub record_gated: BTreeMap<String, Vec<PathBuf>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let mut record_gated = BTreeMap::new();
        record_gated.insert(
            SCHOOL_BOARDS_ID.to_string(),
            vec![
                PathBuf::from("data/school_boards_with_acronyms.json"),
                PathBuf::from(format!("data/{DATE_STAMP_PREFIX}school_boards.json")),
            ],
        );
        Self {
            date_stamp_prefix: DATE_STAMP_PREFIX.to_string(),
            record_gated,
        }
    }
}

impl ResolverConfig {
    /// Config with no record-gated overrides.
    pub fn existence_only() -> Self {
        Self {
            record_gated: BTreeMap::new(),
            ..Default::default()
        }
    }

    /// Register (or replace) a record-gated override.
    #[must_use]
    pub fn with_record_gated<I, P>(mut self, id: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.record_gated
            .insert(id.into(), candidates.into_iter().map(Into::into).collect());
        self
    }

    pub fn rule_for(&self, id: &str) -> ResolutionRule<'_> {
        match self.record_gated.get(id) {
            Some(candidates) => ResolutionRule::RecordGated(candidates),
            None => ResolutionRule::ExistenceGated,
        }
    }
}

/// Configuration for opening a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Manifest path, relative to the registry root.
    pub manifest_file: PathBuf,
    pub resolver: ResolverConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            manifest_file: PathBuf::from(MANIFEST_FILE_NAME),
            resolver: ResolverConfig::default(),
        }
    }
}

impl RegistryConfig {
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }
}
