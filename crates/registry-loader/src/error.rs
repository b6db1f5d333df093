#![deny(unsafe_code)]

use std::path::PathBuf;

/// Errors raised while loading the registry.
///
/// Missing manifests and missing data files are not errors; they surface as
/// an empty registry or as absent data. Only unreadable or malformed files
/// end up here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: DataParseError,
    },
}

/// Format-specific parse failure of a data file.
#[derive(Debug, thiserror::Error)]
pub enum DataParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn data_parse(path: impl Into<PathBuf>, source: impl Into<DataParseError>) -> Self {
        Self::DataParse {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
