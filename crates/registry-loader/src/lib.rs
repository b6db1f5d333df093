#![deny(unsafe_code)]

//! Loads a standards registry from disk and answers queries over it.
//!
//! ```text
//! <root>/
//! ├── registry.yaml          # manifest: one entry per standard
//! └── data/
//!     ├── codes.yaml         # data for a standard whose path is data/codes.yaml
//!     ├── 20251030_codes.yaml
//!     └── codes.json
//! ```
//!
//! ```rust,ignore
//! use registry_loader::StandardsRegistry;
//!
//! let registry = StandardsRegistry::open("/srv/standards")?;
//! for standard in registry.list_standards() {
//!     let stats = registry.get_statistics(&standard.id)?;
//!     println!("{}: {:?}", standard.id, stats.map(|s| s.total_records));
//! }
//! let hits = registry.search_records("school_boards", "toronto")?;
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod resolver;

pub use crate::config::{
    MANIFEST_FILE_NAME, REGISTRY_ENV_VAR, RegistryConfig, ResolutionRule, ResolverConfig,
    registry_root,
};
pub use crate::error::{DataParseError, RegistryError, Result};
pub use crate::registry::StandardsRegistry;
pub use crate::resolver::{DataResolver, read_document};
