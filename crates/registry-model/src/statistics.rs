use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::standard::Standard;

/// Record count and field names of one dataset.
///
/// `fields` lists the keys of the first record only. Fields that appear only
/// in later records are not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub fields: Vec<String>,
}

impl DatasetStatistics {
    /// Returns `None` for an empty dataset.
    pub fn from_records(records: &[Record]) -> Option<Self> {
        let first = records.first()?;
        Some(Self {
            total_records: records.len(),
            fields: first.field_names(),
        })
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// One line of the registry overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewEntry {
    pub standard: Standard,
    pub record_count: usize,
}

/// Record counts for every standard, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistryOverview {
    pub entries: Vec<OverviewEntry>,
    pub total_records: usize,
}

impl RegistryOverview {
    pub fn push(&mut self, standard: Standard, record_count: usize) {
        self.total_records += record_count;
        self.entries.push(OverviewEntry {
            standard,
            record_count,
        });
    }

    pub fn standard_count(&self) -> usize {
        self.entries.len()
    }
}
