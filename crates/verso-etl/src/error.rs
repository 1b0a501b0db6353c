//! Error types for import, export, and library storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a whole file or library operation.
///
/// A bad record inside an otherwise readable file is not an error; it is
/// listed in the [`ImportReport`](crate::ImportReport) instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file is not valid JSON of the expected shape.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The file extension is not one verso reads or writes.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// An error propagated from the core domain layer.
    #[error(transparent)]
    Core(#[from] verso_core::Error),
}

impl ImportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for import and export results.
pub type ImportResult<T> = std::result::Result<T, ImportError>;
