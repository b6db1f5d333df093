//! Data model for the standards registry.
//!
//! - [`standard`]: manifest descriptors ([`Standard`], [`SourceAttribution`])
//! - [`record`]: canonical records and their string forms
//! - [`shape`]: document layout detection and record normalization
//! - [`statistics`]: per-dataset statistics and the registry overview

pub mod record;
pub mod shape;
pub mod standard;
pub mod statistics;

pub use record::{Record, value_text};
pub use shape::{DocumentShape, normalize_records};
pub use standard::{SourceAttribution, Standard};
pub use statistics::{DatasetStatistics, OverviewEntry, RegistryOverview};
