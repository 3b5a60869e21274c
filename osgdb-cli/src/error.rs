use thiserror::Error;

use osgdb_lib::MaintError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A maintenance operation failed
    #[error("{0}")]
    Maintenance(#[from] MaintError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Link probing could not start
    #[error("Link check error: {0}")]
    Links(#[from] osgdb_links::LinkError),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
