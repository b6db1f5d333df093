#![deny(unsafe_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use registry_model::{DatasetStatistics, Record, RegistryOverview, Standard, normalize_records};
use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::manifest::load_manifest;
use crate::resolver::DataResolver;

/// The standards registry: manifest descriptors plus a lazily filled
/// document cache.
///
/// Successful loads are cached for the lifetime of the value and never
/// invalidated. Absent data is not cached, so a missing file is looked for
/// again on every call.
#[derive(Debug)]
pub struct StandardsRegistry {
    root: PathBuf,
    config: RegistryConfig,
    standards: Vec<Standard>,
    index: HashMap<String, usize>,
    cache: RwLock<HashMap<String, Arc<Value>>>,
}

impl StandardsRegistry {
    /// Open the registry at `root` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(root, RegistryConfig::default())
    }

    /// Open the registry at `root` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    pub fn with_config(root: impl Into<PathBuf>, config: RegistryConfig) -> Result<Self> {
        let root = root.into();
        let manifest = load_manifest(&root.join(&config.manifest_file))?;
        let (standards, index) = index_standards(manifest.registry.into_iter().map(Standard::from));
        debug!(
            root = %root.display(),
            standards = standards.len(),
            "loaded registry manifest"
        );
        Ok(Self {
            root,
            config,
            standards,
            index,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }

    /// All standards in manifest order.
    pub fn list_standards(&self) -> &[Standard] {
        &self.standards
    }

    /// Look up a standard. Blank ids never match.
    pub fn get_standard(&self, id: &str) -> Option<&Standard> {
        self.index
            .get(id)
            .map(|&position| &self.standards[position])
            .filter(|standard| standard.has_valid_id())
    }

    /// Raw data document for a standard, loaded once and then served from cache.
    ///
    /// Returns `Ok(None)` for unknown ids and for standards without data.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved data file cannot be read or parsed.
    pub fn load_standard_data(&self, id: &str) -> Result<Option<Arc<Value>>> {
        if let Some(document) = self.cached(id) {
            return Ok(Some(document));
        }
        let Some(standard) = self.get_standard(id) else {
            return Ok(None);
        };
        let resolver = DataResolver::new(&self.root, &self.config.resolver);
        Ok(resolver
            .resolve(standard)?
            .map(|document| self.store(id, document)))
    }

    /// Canonical records for a standard, empty when there is no data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read or parsed.
    pub fn get_records(&self, id: &str) -> Result<Vec<Record>> {
        Ok(self
            .load_standard_data(id)?
            .map(|document| normalize_records(&document))
            .unwrap_or_default())
    }

    /// Record count and first-record field names, or `None` without data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read or parsed.
    pub fn get_statistics(&self, id: &str) -> Result<Option<DatasetStatistics>> {
        Ok(DatasetStatistics::from_records(&self.get_records(id)?))
    }

    /// Records whose non-null values contain `query`, ignoring case.
    ///
    /// An empty query matches nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read or parsed.
    pub fn search_records(&self, id: &str, query: &str) -> Result<Vec<Record>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        let matches: Vec<Record> = self
            .get_records(id)?
            .into_iter()
            .filter(|record| record.matches(&needle))
            .collect();
        debug!(id, query, matches = matches.len(), "searched records");
        Ok(matches)
    }

    /// Record counts for every standard in manifest order.
    ///
    /// # Errors
    ///
    /// Returns an error if any data file cannot be read or parsed.
    pub fn overview(&self) -> Result<RegistryOverview> {
        let mut overview = RegistryOverview::default();
        for standard in &self.standards {
            let count = self
                .get_statistics(&standard.id)?
                .map_or(0, |stats| stats.total_records);
            overview.push(standard.clone(), count);
        }
        Ok(overview)
    }

    /// Returns true if a document for `id` is cached.
    pub fn is_cached(&self, id: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    fn cached(&self, id: &str) -> Option<Arc<Value>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    // Parsing happens outside the lock; a racing loader keeps the first insert.
    fn store(&self, id: &str, document: Value) -> Arc<Value> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(document)),
        )
    }
}

/// Index standards by id. A repeated id replaces the earlier standard in
/// place, so it keeps the first position and the last contents.
fn index_standards<I>(standards: I) -> (Vec<Standard>, HashMap<String, usize>)
where
    I: IntoIterator<Item = Standard>,
{
    let mut ordered: Vec<Standard> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for standard in standards {
        match index.get(&standard.id) {
            Some(&position) => {
                debug!(id = %standard.id, "duplicate standard id, later entry wins");
                ordered[position] = standard;
            }
            None => {
                index.insert(standard.id.clone(), ordered.len());
                ordered.push(standard);
            }
        }
    }
    (ordered, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(id: &str, title: &str) -> Standard {
        Standard {
            id: id.to_string(),
            title: title.to_string(),
            ..Standard::default()
        }
    }

    #[test]
    fn duplicate_ids_keep_first_position_and_last_contents() {
        let (ordered, index) = index_standards([
            standard("a", "first"),
            standard("b", "b"),
            standard("a", "second"),
        ]);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].title, "second");
        assert_eq!(ordered[1].id, "b");
        assert_eq!(index["a"], 0);
    }

    #[test]
    fn blank_ids_are_stored_but_collapse() {
        let (ordered, _) = index_standards([standard("", "x"), standard("", "y")]);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].title, "y");
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StandardsRegistry>();
    }
}
