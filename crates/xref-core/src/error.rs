//! Error types for the cross-reference resolver.
//!
//! The taxonomy is deliberately narrow: a missing or unreadable source table
//! is the only fatal condition. Malformed rows are dropped silently during
//! ingestion, collaborator failures degrade to empty results, and "no match"
//! or "query too short" are normal outcomes expressed by
//! [`crate::search::Resolution`], not errors.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for cross-reference operations.
#[derive(Debug, Error)]
pub enum XrefError {
    /// A source table is missing or unreadable at startup. Fatal: the
    /// operator must supply the file and restart; queries are not served
    /// without the primary index.
    #[error("data source unavailable: {message}")]
    DataSource {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Collaborator errors; callers on the query path swallow these and log.
    #[error("network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("request timeout after {0:?}")]
    Timeout(Duration),

    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for cross-reference operations.
pub type Result<T> = std::result::Result<T, XrefError>;

impl From<std::io::Error> for XrefError {
    fn from(err: std::io::Error) -> Self {
        XrefError::DataSource {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<csv::Error> for XrefError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => XrefError::DataSource {
                message,
                path: None,
                source: Some(source),
            },
            _ => XrefError::DataSource {
                message,
                path: None,
                source: None,
            },
        }
    }
}

impl From<reqwest::Error> for XrefError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            XrefError::Timeout(Duration::from_secs(0))
        } else {
            XrefError::Network {
                message: err.to_string(),
                cause: Some(err.to_string()),
            }
        }
    }
}

impl XrefError {
    /// Attach a path to a data-source error produced without one.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            XrefError::DataSource {
                message, source, ..
            } => XrefError::DataSource {
                message,
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }

    /// True for startup failures that must abort query serving.
    pub fn is_fatal(&self) -> bool {
        matches!(self, XrefError::DataSource { .. } | XrefError::Config { .. })
    }
}
