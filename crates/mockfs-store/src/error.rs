//! Error types for mockfs-store

use std::path::PathBuf;

/// Result type for mockfs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mockfs operations
///
/// The entry store itself only ever produces [`Error::AccessDenied`],
/// [`Error::NotADirectory`] and [`Error::InvalidPath`]. The remaining
/// variants are raised by the facades and by fixture loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Access to the path '{path}' is denied.")]
    AccessDenied { path: String },

    #[error("Could not find a part of the path '{path}'.")]
    NotFound { path: String },

    #[error("The path '{path}' is a directory.")]
    IsDirectory { path: String },

    #[error("The path '{path}' is not a directory.")]
    NotADirectory { path: String },

    #[error("The path '{path}' already exists.")]
    AlreadyExists { path: String },

    #[error("The directory '{path}' is not empty.")]
    NotEmpty { path: String },

    #[error("Invalid path: '{path}'")]
    InvalidPath { path: String },

    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} fixture at {path}: {message}")]
    FixtureParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} fixture: {message}")]
    FixtureSerialize { format: String, message: String },

    #[error("Unsupported fixture format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn access_denied(path: impl Into<String>) -> Self {
        Self::AccessDenied { path: path.into() }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether this is the read-only guard firing.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}
