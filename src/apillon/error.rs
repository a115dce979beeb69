//! Apillon client error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::security::PathSecurityError;

/// Result type for platform calls.
pub type ApillonResult<T> = Result<T, ApillonError>;

/// Failures raised by the platform client or by the local reads it depends on.
#[derive(Debug, Error)]
pub enum ApillonError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The platform answered successfully but the body was not what we expect.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Local file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local path rejected by the configured root.
    #[error(transparent)]
    PathSecurity(#[from] PathSecurityError),
}

impl ApillonError {
    /// Create an error for a response body we cannot interpret.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
