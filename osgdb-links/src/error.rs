/// Errors that can occur while setting up a link audit.
///
/// Failures of individual URLs are never errors, they are reported as
/// [`crate::audit::LinkFinding`] values.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
