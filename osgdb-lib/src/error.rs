use thiserror::Error;

use osgdb_catalog::CatalogError;
use osgdb_links::LinkError;

/// Problems with the autogenerated region of the summary document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("no autogenerated region found")]
    Missing,

    #[error("found {starts} start and {ends} end markers, expected exactly one of each")]
    Duplicated { starts: usize, ends: usize },

    #[error("end marker precedes start marker")]
    Malformed,
}

/// Errors that abort a maintenance operation.
#[derive(Debug, Error)]
pub enum MaintError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Links(#[from] LinkError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Entries not yet loaded")]
    EntriesNotLoaded,

    #[error("Summary document has an invalid structure: {0}")]
    Region(#[from] RegionError),
}

impl MaintError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
