//! Error types for conversion operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by conversion operations.
///
/// Usage errors are reported before any filesystem work has started; the
/// remaining variants carry the first failure observed by a pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// A filesystem primitive failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced.
    #[error("invalid json for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory source tree was supplied without a destination.
    #[error("a destination path is required when the source is an in-memory tree")]
    DestinationRequired,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
